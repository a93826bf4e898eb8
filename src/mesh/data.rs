//! CPU-side mesh data.
//!
//! [`MeshData`] is the value every stage of the geometry pipeline consumes
//! and produces. Stages never mutate a mesh in place; they return a new one.

use glam::{Vec2, Vec3};

use crate::error::{check_index_range, GeometryError, GeometryResult};

/// Triangle mesh with per-vertex attributes and 16-bit elements.
///
/// Invariants (checked by [`MeshData::validate`]):
/// - `vertices`, `normals` and `tex_coords` have the same length, and so do
///   `tangents`/`bitangents` once computed (empty before that).
/// - every element is `< vertices.len()`.
/// - `elements.len()` is a multiple of 3.
/// - `vertices.len() <= 65536`.
///
/// Triangles wind counter-clockwise when viewed from the outward face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub elements: Vec<u16>,
    /// Vertices whose tangent frame is a substitute rather than solved from
    /// UVs, in ascending order. Empty unless the tangent pass ran with
    /// `DegeneratePolicy::Fallback`.
    pub fallback_vertices: Vec<usize>,
}

impl MeshData {
    /// Create a mesh without tangent data.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        elements: Vec<u16>,
    ) -> Self {
        Self {
            vertices,
            normals,
            tex_coords,
            tangents: Vec::new(),
            bitangents: Vec::new(),
            elements,
            fallback_vertices: Vec::new(),
        }
    }

    /// Create a mesh and check its invariants.
    pub fn try_new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        elements: Vec<u16>,
    ) -> GeometryResult<Self> {
        let mesh = Self::new(vertices, normals, tex_coords, elements);
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.elements.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.elements.len() / 3
    }

    /// Whether the tangent-space pass has populated this mesh.
    pub fn has_tangents(&self) -> bool {
        !self.vertices.is_empty() && self.tangents.len() == self.vertices.len()
    }

    /// Iterate triangles as `[i0, i1, i2]` vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.elements
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Check the attribute lengths only (the tangent solver's precondition).
    pub fn check_attribute_lengths(&self) -> GeometryResult<()> {
        let vertices = self.vertices.len();
        if self.normals.len() != vertices || self.tex_coords.len() != vertices {
            return Err(GeometryError::ShapeMismatch {
                vertices,
                normals: self.normals.len(),
                tex_coords: self.tex_coords.len(),
            });
        }
        Ok(())
    }

    /// Check every structural invariant of the mesh.
    pub fn validate(&self) -> GeometryResult<()> {
        self.check_attribute_lengths()?;

        let vertex_count = self.vertices.len();
        let tangents_present = !self.tangents.is_empty() || !self.bitangents.is_empty();
        if tangents_present
            && (self.tangents.len() != vertex_count || self.bitangents.len() != vertex_count)
        {
            return Err(GeometryError::TangentShapeMismatch {
                vertices: vertex_count,
                tangents: self.tangents.len(),
                bitangents: self.bitangents.len(),
            });
        }

        if self.elements.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle {
                len: self.elements.len(),
            });
        }

        check_index_range(vertex_count)?;

        if let Some(element) = self
            .elements
            .iter()
            .position(|&index| index as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfBounds {
                element,
                index: self.elements[element],
                vertex_count,
            });
        }

        Ok(())
    }

    /// Return a copy of this mesh with the given tangent frame attached.
    ///
    /// The frame is taken as solved, so any fallback flags are cleared.
    pub fn with_tangents(
        mut self,
        tangents: Vec<Vec3>,
        bitangents: Vec<Vec3>,
    ) -> GeometryResult<Self> {
        self.tangents = tangents;
        self.bitangents = bitangents;
        self.fallback_vertices.clear();
        self.validate()?;
        Ok(self)
    }

    /// Drop any tangent frame, e.g. after the geometry changed.
    pub fn without_tangents(mut self) -> Self {
        self.tangents.clear();
        self.bitangents.clear();
        self.fallback_vertices.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> MeshData {
        MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_tangents());
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_shape_mismatch() {
        let mut mesh = single_triangle();
        mesh.normals.pop();
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::ShapeMismatch {
                vertices: 3,
                normals: 2,
                tex_coords: 3
            })
        );
    }

    #[test]
    fn test_index_out_of_bounds() {
        let mut mesh = single_triangle();
        mesh.elements[2] = 3;
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::IndexOutOfBounds {
                element: 2,
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_incomplete_triangle() {
        let mut mesh = single_triangle();
        mesh.elements.push(0);
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::IncompleteTriangle { len: 4 })
        );
    }

    #[test]
    fn test_tangent_lengths() {
        let mesh = single_triangle();
        let err = mesh
            .clone()
            .with_tangents(vec![Vec3::X; 3], vec![Vec3::Y; 2])
            .unwrap_err();
        assert!(matches!(err, GeometryError::TangentShapeMismatch { .. }));

        let finalized = mesh
            .with_tangents(vec![Vec3::X; 3], vec![Vec3::Y; 3])
            .unwrap();
        assert!(finalized.has_tangents());
        assert!(!finalized.without_tangents().has_tangents());
    }
}
