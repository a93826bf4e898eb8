//! CPU-side mesh types and the procedural geometry pipeline.
//!
//! - [`MeshData`] - positions, normals, UVs, tangent frame and 16-bit elements
//! - [`generators`] - seed shapes (grid, cube, octahedron, UV sphere, triangle)
//! - [`tessellate`] - 4-way midpoint subdivision
//! - [`compute_tangent_frames`] - per-vertex tangent space for normal mapping
//! - [`MeshBuffers`] - flattened copies for GPU upload

mod buffers;
mod data;
pub mod generators;
mod tangents;
mod tessellate;

pub use buffers::{MeshBuffers, Vertex};
pub use data::MeshData;
pub use tangents::{
    compute_tangent_frames, compute_tangents_and_bitangents, DegeneratePolicy,
    TangentAccumulation, TangentFrames, TangentOptions, MIN_UV_AREA,
};
pub use tessellate::{projected_vertex_count, tessellate, tessellate_with, TessellateOptions};
