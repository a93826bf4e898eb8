//! Tessellation engine.
//!
//! Linear 4-way midpoint subdivision. New positions, normals and UVs are
//! edge midpoints (normals re-normalized); nothing is smoothed. Edges shared
//! by two triangles are bisected twice, once per triangle, so every round
//! adds exactly three vertices per input triangle.

use super::data::MeshData;
use crate::error::{check_index_range, GeometryResult};
use crate::math::{midpoint, normalize};

/// Options for [`tessellate_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TessellateOptions {
    /// Push new vertex positions onto the unit sphere.
    pub project_to_unit_sphere: bool,
}

impl TessellateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit_sphere_projection(mut self, project: bool) -> Self {
        self.project_to_unit_sphere = project;
        self
    }
}

/// Vertex count after `iterations` rounds, or `None` on `usize` overflow.
pub fn projected_vertex_count(
    vertex_count: usize,
    triangle_count: usize,
    iterations: u32,
) -> Option<usize> {
    let mut vertices = vertex_count;
    let mut triangles = triangle_count;
    for _ in 0..iterations {
        vertices = vertices.checked_add(triangles.checked_mul(3)?)?;
        triangles = triangles.checked_mul(4)?;
    }
    Some(vertices)
}

/// Split every triangle into four, `iterations` times.
///
/// Returns a new mesh; `iterations == 0` yields a structurally equal copy.
/// Any tangent frame on the input is dropped since it no longer matches the
/// geometry.
pub fn tessellate(iterations: u32, mesh: &MeshData) -> GeometryResult<MeshData> {
    tessellate_with(iterations, mesh, &TessellateOptions::default())
}

/// [`tessellate`] with explicit options.
pub fn tessellate_with(
    iterations: u32,
    mesh: &MeshData,
    options: &TessellateOptions,
) -> GeometryResult<MeshData> {
    mesh.validate()?;

    if iterations == 0 {
        return Ok(mesh.clone());
    }

    let final_vertices =
        projected_vertex_count(mesh.vertex_count(), mesh.triangle_count(), iterations)
            .unwrap_or(usize::MAX);
    check_index_range(final_vertices)?;

    let mut vertices = mesh.vertices.clone();
    let mut normals = mesh.normals.clone();
    let mut tex_coords = mesh.tex_coords.clone();
    let mut elements = mesh.elements.clone();

    vertices.reserve(final_vertices - vertices.len());
    normals.reserve(final_vertices - normals.len());
    tex_coords.reserve(final_vertices - tex_coords.len());

    for round in 0..iterations {
        let mut next = Vec::with_capacity(elements.len() * 4);

        for tri in elements.chunks_exact(3) {
            let (i1, i2, i3) = (tri[0], tri[1], tri[2]);
            let (a, b, c) = (i1 as usize, i2 as usize, i3 as usize);

            let mut v12 = midpoint(vertices[a], vertices[b]);
            let mut v13 = midpoint(vertices[a], vertices[c]);
            let mut v23 = midpoint(vertices[b], vertices[c]);
            if options.project_to_unit_sphere {
                v12 = normalize(v12)?;
                v13 = normalize(v13)?;
                v23 = normalize(v23)?;
            }

            let t12 = midpoint(tex_coords[a], tex_coords[b]);
            let t13 = midpoint(tex_coords[a], tex_coords[c]);
            let t23 = midpoint(tex_coords[b], tex_coords[c]);

            let n12 = normalize(midpoint(normals[a], normals[b]))?;
            let n13 = normalize(midpoint(normals[a], normals[c]))?;
            let n23 = normalize(midpoint(normals[b], normals[c]))?;

            // Bounded by the projected count checked above
            let i12 = vertices.len() as u16;
            let i13 = i12 + 1;
            let i23 = i12 + 2;

            vertices.extend_from_slice(&[v12, v13, v23]);
            normals.extend_from_slice(&[n12, n13, n23]);
            tex_coords.extend_from_slice(&[t12, t13, t23]);

            #[rustfmt::skip]
            next.extend_from_slice(&[
                i1, i12, i13,
                i12, i2, i23,
                i13, i23, i3,
                i12, i23, i13,
            ]);
        }

        elements = next;
        log::debug!(
            "tessellation round {}/{}: {} vertices, {} triangles",
            round + 1,
            iterations,
            vertices.len(),
            elements.len() / 3
        );
    }

    Ok(MeshData::new(vertices, normals, tex_coords, elements))
}
