//! Geometry Engine - procedural meshes for normal-mapped rendering
//!
//! The engine builds meshes on the CPU and hands flat buffers to whatever
//! GPU backend draws them:
//! - Seed generators for grids, cubes, octahedra and UV spheres
//! - Recursive 4-way midpoint tessellation (geodesic spheres from an octahedron)
//! - Per-vertex tangent space (tangent, bitangent, normal) from UV deltas
//! - Transform nodes producing model and normal matrices
//!
//! Every stage returns a new [`MeshData`] rather than mutating its input, and
//! there is no global state, so separate meshes can be built on separate
//! threads (see [`recipe::build_all`]).
//!
//! ```ignore
//! use geometry_engine::{MeshRecipe, Pose, TransformNode};
//!
//! let mesh = MeshRecipe::octa_sphere(4).build()?;
//! let node = TransformNode::new(mesh).with_pose(Pose::new().with_translation(glam::Vec3::X));
//! let uniforms = node.uniform_data();
//! ```

pub mod error;
pub mod math;
pub mod mesh;
pub mod recipe;
pub mod scene;

pub use error::{GeometryError, GeometryResult, MAX_VERTICES};
pub use mesh::{
    compute_tangent_frames, compute_tangents_and_bitangents, tessellate, tessellate_with,
    DegeneratePolicy, MeshBuffers, MeshData, TangentAccumulation, TangentFrames,
    TangentOptions, TessellateOptions, Vertex,
};
pub use recipe::{build_all, MeshRecipe, Shape};
pub use scene::{
    DrawCall, MaterialReadiness, Pose, RenderObject, Scene, TransformNode,
    TransformUniformData,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
