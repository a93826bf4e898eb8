//! Geometry error types

use thiserror::Error;

/// Largest vertex count addressable by 16-bit element indices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Errors raised by generators, tessellation and the tangent solver.
///
/// All of these are deterministic: retrying with the same input reproduces
/// the same failure. A render loop should skip the offending mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Attribute length mismatch: {vertices} vertices, {normals} normals, {tex_coords} texture coordinates")]
    ShapeMismatch {
        vertices: usize,
        normals: usize,
        tex_coords: usize,
    },
    #[error("Tangent length mismatch: {vertices} vertices, {tangents} tangents, {bitangents} bitangents")]
    TangentShapeMismatch {
        vertices: usize,
        tangents: usize,
        bitangents: usize,
    },
    #[error("Triangle {triangle} has zero UV area")]
    DegenerateUv { triangle: usize },
    #[error("Cannot normalize a zero-length vector")]
    ZeroLengthNormalize,
    #[error("Vertex count {projected} exceeds the 16-bit index range ({max})")]
    IndexOverflow { projected: usize, max: usize },
    #[error("Element {element} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        element: usize,
        index: u16,
        vertex_count: usize,
    },
    #[error("Element count {len} is not a multiple of 3")]
    IncompleteTriangle { len: usize },
    #[error("Invalid segment count {x_segments}x{y_segments}: both must be at least 1")]
    InvalidSegments { x_segments: u32, y_segments: u32 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Fails with [`GeometryError::IndexOverflow`] if `projected` vertices cannot
/// be addressed by 16-bit elements.
pub fn check_index_range(projected: usize) -> GeometryResult<()> {
    if projected > MAX_VERTICES {
        return Err(GeometryError::IndexOverflow {
            projected,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}
