//! Vector math kernel.
//!
//! Thin, by-value helpers over `glam` types. None of these mutate their
//! operands, so they are safe to call from any number of threads.

use std::ops::{Add, Mul, Sub};

use crate::error::{GeometryError, GeometryResult};

pub use glam::{Mat3, Mat4, Vec2, Vec3};

// ===== Component-wise arithmetic (2D and 3D) =====

/// `a + b`.
pub fn add<V: Add<Output = V>>(a: V, b: V) -> V {
    a + b
}

/// `a - b`.
pub fn sub<V: Sub<Output = V>>(a: V, b: V) -> V {
    a - b
}

/// `a * k`.
pub fn scale<V: Mul<f32, Output = V>>(a: V, k: f32) -> V {
    a * k
}

/// `(a + b) / 2`, exact and unnormalized. Used for edge bisection.
pub fn midpoint<V: Add<Output = V> + Mul<f32, Output = V>>(a: V, b: V) -> V {
    (a + b) * 0.5
}

// ===== 3D products =====

/// `a · b`.
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

/// `a × b`, right-handed.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

/// Returns `a / |a|`.
///
/// Fails with [`GeometryError::ZeroLengthNormalize`] when `a` has zero (or
/// non-finite) length instead of producing NaN.
pub fn normalize(a: Vec3) -> GeometryResult<Vec3> {
    a.try_normalize().ok_or(GeometryError::ZeroLengthNormalize)
}

// ===== 2D helpers =====

/// Signed area of the parallelogram spanned by `a` and `b`
/// (`a.x * b.y - a.y * b.x`).
pub fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Flatten a slice of 3D vectors into `[x, y, z, x, y, z, ...]`.
pub fn flatten_vec3(values: &[Vec3]) -> Vec<f32> {
    values.iter().flat_map(|v| v.to_array()).collect()
}

/// Flatten a slice of 2D vectors into `[x, y, x, y, ...]`.
pub fn flatten_vec2(values: &[Vec2]) -> Vec<f32> {
    values.iter().flat_map(|v| v.to_array()).collect()
}
