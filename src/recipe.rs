//! Mesh recipes.
//!
//! A [`MeshRecipe`] is the configuration for one mesh: which seed shape to
//! generate, how many tessellation rounds to apply and how to solve its
//! tangent space. Building runs those stages strictly in order, since each
//! consumes the previous one's output. Independent recipes can be built in
//! parallel with [`build_all`].

use rayon::prelude::*;

use crate::error::GeometryResult;
use crate::mesh::generators;
use crate::mesh::{
    tessellate_with, DegeneratePolicy, MeshData, TangentOptions, TessellateOptions,
};
use crate::scene::TransformNode;

/// Seed shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Grid { x_segments: u32, y_segments: u32 },
    Cube,
    Octahedron,
    UvSphere { x_segments: u32, y_segments: u32 },
    Triangle,
}

impl Shape {
    /// 10x10 grid
    pub fn default_grid() -> Self {
        Self::Grid {
            x_segments: 10,
            y_segments: 10,
        }
    }

    /// 64x64 UV sphere
    pub fn default_uv_sphere() -> Self {
        Self::UvSphere {
            x_segments: 64,
            y_segments: 64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::Cube => "cube",
            Self::Octahedron => "octahedron",
            Self::UvSphere { .. } => "uv_sphere",
            Self::Triangle => "triangle",
        }
    }

    /// Run the seed generator for this shape.
    pub fn generate(&self) -> GeometryResult<MeshData> {
        match *self {
            Self::Grid {
                x_segments,
                y_segments,
            } => generators::grid(x_segments, y_segments),
            Self::Cube => Ok(generators::cube()),
            Self::Octahedron => Ok(generators::octahedron()),
            Self::UvSphere {
                x_segments,
                y_segments,
            } => generators::uv_sphere(x_segments, y_segments),
            Self::Triangle => Ok(generators::triangle()),
        }
    }
}

/// Configuration for building one finalized mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecipe {
    pub shape: Shape,
    pub iterations: u32,
    pub tessellation: TessellateOptions,
    pub tangents: TangentOptions,
    pub label: Option<String>,
}

impl MeshRecipe {
    /// Recipe with per-shape defaults: the octahedron is projected onto the
    /// unit sphere while tessellating, and the UV sphere tolerates its
    /// collapsed pole rows with fallback tangent frames.
    pub fn new(shape: Shape) -> Self {
        let tessellation = TessellateOptions::new()
            .with_unit_sphere_projection(matches!(shape, Shape::Octahedron));
        let tangents = match shape {
            Shape::UvSphere { .. } => {
                TangentOptions::new().with_degenerate_policy(DegeneratePolicy::Fallback)
            }
            _ => TangentOptions::new(),
        };
        Self {
            shape,
            iterations: 0,
            tessellation,
            tangents,
            label: None,
        }
    }

    /// Grid floor, tessellated three times like the scene's default grid.
    pub fn grid(x_segments: u32, y_segments: u32) -> Self {
        Self::new(Shape::Grid {
            x_segments,
            y_segments,
        })
        .with_iterations(3)
    }

    pub fn cube() -> Self {
        Self::new(Shape::Cube)
    }

    pub fn octa_sphere(iterations: u32) -> Self {
        Self::new(Shape::Octahedron).with_iterations(iterations)
    }

    pub fn uv_sphere(x_segments: u32, y_segments: u32) -> Self {
        Self::new(Shape::UvSphere {
            x_segments,
            y_segments,
        })
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_tessellation(mut self, tessellation: TessellateOptions) -> Self {
        self.tessellation = tessellation;
        self
    }

    pub fn with_tangents(mut self, tangents: TangentOptions) -> Self {
        self.tangents = tangents;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.shape.name())
    }

    /// Generate, tessellate and tangent-solve, in that order.
    ///
    /// Vertices given a substitute tangent frame are listed in the result's
    /// [`MeshData::fallback_vertices`].
    pub fn build(&self) -> GeometryResult<MeshData> {
        let seed = self.shape.generate()?;
        let mesh = tessellate_with(self.iterations, &seed, &self.tessellation)?
            .with_computed_tangents(&self.tangents)?;

        log::info!(
            "built mesh '{}': {} vertices, {} triangles, {} fallback frames",
            self.label(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.fallback_vertices.len()
        );
        Ok(mesh)
    }

    /// Build and wrap in a [`TransformNode`] with the identity pose.
    pub fn build_node(&self) -> GeometryResult<TransformNode> {
        self.build().map(TransformNode::new)
    }
}

impl Default for MeshRecipe {
    fn default() -> Self {
        Self::cube()
    }
}

/// Build independent recipes in parallel. Results are in input order, and a
/// failing recipe does not affect the others.
pub fn build_all(recipes: &[MeshRecipe]) -> Vec<GeometryResult<MeshData>> {
    recipes.par_iter().map(MeshRecipe::build).collect()
}
