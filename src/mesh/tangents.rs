//! Tangent-space solver.
//!
//! Derives a per-vertex tangent/bitangent pair from position and UV deltas,
//! then Gram-Schmidt orthogonalizes each tangent against its normal and
//! flips it when the frame is mirrored.

use glam::Vec3;

use super::data::MeshData;
use crate::error::{GeometryError, GeometryResult};
use crate::math::{cross2, normalize};

/// UV parallelograms smaller than this are treated as degenerate.
pub const MIN_UV_AREA: f32 = 1e-12;

/// How per-triangle results are combined at shared vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TangentAccumulation {
    /// Each triangle assigns its tangent to its three vertices; the last
    /// triangle touching a vertex wins.
    #[default]
    Overwrite,
    /// Contributions of every adjacent triangle are averaged.
    Average,
}

/// What to do with degenerate UV triangles and tangents that cannot be
/// orthogonalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Fail with `DegenerateUv` or `ZeroLengthNormalize`.
    #[default]
    Reject,
    /// Skip degenerate triangles and give affected vertices an arbitrary
    /// frame orthonormal to their normal. Affected vertices are reported in
    /// [`TangentFrames::fallback_vertices`].
    Fallback,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TangentOptions {
    pub accumulation: TangentAccumulation,
    pub degenerate: DegeneratePolicy,
}

impl TangentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accumulation(mut self, accumulation: TangentAccumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_degenerate_policy(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }
}

/// Output of the tangent solver, parallel to the mesh vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TangentFrames {
    /// Unit tangents, orthogonal to the vertex normals.
    pub tangents: Vec<Vec3>,
    /// Raw UV-space bitangents (not normalized).
    pub bitangents: Vec<Vec3>,
    /// Vertices that received a substitute frame under
    /// [`DegeneratePolicy::Fallback`], in ascending order.
    pub fallback_vertices: Vec<usize>,
}

/// Tangents and bitangents with the default options (overwrite, reject).
pub fn compute_tangents_and_bitangents(
    mesh: &MeshData,
) -> GeometryResult<(Vec<Vec3>, Vec<Vec3>)> {
    let frames = compute_tangent_frames(mesh, &TangentOptions::default())?;
    Ok((frames.tangents, frames.bitangents))
}

/// Solve the tangent frame of every vertex.
///
/// Fails with `ShapeMismatch` before doing any work if the attribute arrays
/// disagree in length. Vertices not referenced by any triangle have no
/// tangent and are handled by the degenerate policy.
pub fn compute_tangent_frames(
    mesh: &MeshData,
    options: &TangentOptions,
) -> GeometryResult<TangentFrames> {
    mesh.validate()?;

    let vertex_count = mesh.vertex_count();
    let mut tangents = vec![Vec3::ZERO; vertex_count];
    let mut bitangents = vec![Vec3::ZERO; vertex_count];
    let mut contributions = vec![0u32; vertex_count];
    let mut skipped_triangles = 0usize;

    log::debug!(
        "solving tangents: {} vertices, {} triangles, {:?}",
        vertex_count,
        mesh.triangle_count(),
        options
    );

    for (triangle, [i0, i1, i2]) in mesh.triangles().enumerate() {
        let v0 = mesh.vertices[i0];
        let uv0 = mesh.tex_coords[i0];

        let delta_pos1 = mesh.vertices[i1] - v0;
        let delta_pos2 = mesh.vertices[i2] - v0;
        let delta_uv1 = mesh.tex_coords[i1] - uv0;
        let delta_uv2 = mesh.tex_coords[i2] - uv0;

        let area = cross2(delta_uv1, delta_uv2);
        // NaN areas count as degenerate too
        if !(area.abs() >= MIN_UV_AREA) {
            match options.degenerate {
                DegeneratePolicy::Reject => return Err(GeometryError::DegenerateUv { triangle }),
                DegeneratePolicy::Fallback => {
                    skipped_triangles += 1;
                    continue;
                }
            }
        }

        let r = 1.0 / area;
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * r;

        for i in [i0, i1, i2] {
            match options.accumulation {
                TangentAccumulation::Overwrite => {
                    tangents[i] = tangent;
                    bitangents[i] = bitangent;
                }
                TangentAccumulation::Average => {
                    tangents[i] += tangent;
                    bitangents[i] += bitangent;
                    contributions[i] += 1;
                }
            }
        }
    }

    if options.accumulation == TangentAccumulation::Average {
        for ((t, b), &count) in tangents.iter_mut().zip(&mut bitangents).zip(&contributions) {
            if count > 1 {
                *t /= count as f32;
                *b /= count as f32;
            }
        }
    }

    let mut fallback_vertices = Vec::new();
    for i in 0..vertex_count {
        let n = mesh.normals[i];
        let t = tangents[i];
        let b = bitangents[i];

        match normalize(t - n * n.dot(t)) {
            Ok(o) => {
                tangents[i] = if n.cross(t).dot(b) < 0.0 { -o } else { o };
            }
            Err(err) => match options.degenerate {
                DegeneratePolicy::Reject => {
                    log::debug!("vertex {i}: tangent {t} cannot be orthogonalized against {n}");
                    return Err(err);
                }
                DegeneratePolicy::Fallback => {
                    let axis = n.try_normalize().unwrap_or(Vec3::Z);
                    let o = axis.any_orthonormal_vector();
                    tangents[i] = o;
                    bitangents[i] = axis.cross(o);
                    fallback_vertices.push(i);
                }
            },
        }
    }

    if skipped_triangles > 0 || !fallback_vertices.is_empty() {
        log::warn!(
            "tangent fallback: {} degenerate UV triangles skipped, {} vertices given substitute frames",
            skipped_triangles,
            fallback_vertices.len()
        );
    }

    Ok(TangentFrames {
        tangents,
        bitangents,
        fallback_vertices,
    })
}

impl MeshData {
    /// Finalize the mesh by attaching its solved tangent frame.
    ///
    /// Vertices that received a substitute frame are kept in
    /// [`MeshData::fallback_vertices`].
    pub fn with_computed_tangents(self, options: &TangentOptions) -> GeometryResult<Self> {
        let frames = compute_tangent_frames(&self, options)?;
        let mut mesh = self.with_tangents(frames.tangents, frames.bitangents)?;
        mesh.fallback_vertices = frames.fallback_vertices;
        Ok(mesh)
    }
}
