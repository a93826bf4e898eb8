//! Seed geometry generators.
//!
//! Each generator is a pure function returning a fresh [`MeshData`] that
//! satisfies the mesh invariants. Segment counts of zero are rejected, as are
//! resolutions whose vertex count would not fit 16-bit elements.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::data::MeshData;
use super::tessellate::{tessellate, tessellate_with, TessellateOptions};
use crate::error::{check_index_range, GeometryError, GeometryResult};

/// Per-face data for the cube: outward normal and four corners, bottom left
/// first, counter-clockwise when seen from outside.
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    // Front
    (
        Vec3::Z,
        [
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ],
    ),
    // Back
    (
        Vec3::NEG_Z,
        [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        ],
    ),
    // Top
    (
        Vec3::Y,
        [
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
        ],
    ),
    // Bottom
    (
        Vec3::NEG_Y,
        [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ],
    ),
    // Right
    (
        Vec3::X,
        [
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        ],
    ),
    // Left
    (
        Vec3::NEG_X,
        [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ],
    ),
];

const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

const OCTAHEDRON_VERTICES: [Vec3; 6] = [
    Vec3::Y,
    Vec3::NEG_Z,
    Vec3::X,
    Vec3::Z,
    Vec3::NEG_X,
    Vec3::NEG_Y,
];

/// Spherical unwrap of the octahedron corners: `u = 1 - azimuth / 2π`,
/// `v = polar / π`. The poles sit at `u = 0.5`.
///
/// Six shared corners cannot carry a UV seam. `+X` takes `u = 1.0`, so the
/// two faces between `+X` and `-Z` (triangles 0 and 4) run `u` from 1.0 back
/// down to 0.25: they cover three quarters of the texture and are mirrored
/// against the other six. Their tangents point along `-dP/du`.
const OCTAHEDRON_UVS: [Vec2; 6] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(0.25, 0.5),
    Vec2::new(1.0, 0.5),
    Vec2::new(0.75, 0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(0.5, 1.0),
];

/// One triangle per octant, top half first.
#[rustfmt::skip]
const OCTAHEDRON_ELEMENTS: [u16; 24] = [
    0, 2, 1,
    0, 3, 2,
    0, 4, 3,
    0, 1, 4,

    5, 1, 2,
    5, 2, 3,
    5, 3, 4,
    5, 4, 1,
];

fn check_segments(x_segments: u32, y_segments: u32) -> GeometryResult<()> {
    if x_segments == 0 || y_segments == 0 {
        return Err(GeometryError::InvalidSegments {
            x_segments,
            y_segments,
        });
    }
    let vertex_count = (x_segments as usize)
        .checked_add(1)
        .zip((y_segments as usize).checked_add(1))
        .and_then(|(columns, rows)| columns.checked_mul(rows))
        .unwrap_or(usize::MAX);
    check_index_range(vertex_count)
}

/// Two triangles per cell `(i, j)`: `(v1, v2, v4)` and `(v1, v4, v3)` with
/// `v1 = i + (x_segments + 1) * j`, `v2 = v1 + 1`, `v3 = v1 + x_segments + 1`
/// and `v4 = v3 + 1`. Cells are emitted column by column.
fn lattice_elements(x_segments: u32, y_segments: u32) -> Vec<u16> {
    let row = x_segments + 1;
    let mut elements = Vec::with_capacity((x_segments * y_segments * 6) as usize);
    for i in 0..x_segments {
        for j in 0..y_segments {
            let v1 = (i + row * j) as u16;
            let v2 = v1 + 1;
            let v3 = (i + row * (j + 1)) as u16;
            let v4 = v3 + 1;
            elements.extend_from_slice(&[v1, v2, v4, v1, v4, v3]);
        }
    }
    elements
}

/// Planar grid on `[-1, 1]²` at `z = 0`, facing +Z.
///
/// Produces `(x_segments + 1) * (y_segments + 1)` vertices with UVs mapped
/// linearly onto `[0, 1]²`.
pub fn grid(x_segments: u32, y_segments: u32) -> GeometryResult<MeshData> {
    check_segments(x_segments, y_segments)?;

    let vertex_count = ((x_segments + 1) * (y_segments + 1)) as usize;
    let mut vertices = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut tex_coords = Vec::with_capacity(vertex_count);

    let step_x = 2.0 / x_segments as f32;
    let step_y = 2.0 / y_segments as f32;

    for j in 0..=y_segments {
        for i in 0..=x_segments {
            let x = -1.0 + i as f32 * step_x;
            let y = -1.0 + j as f32 * step_y;

            vertices.push(Vec3::new(x, y, 0.0));
            normals.push(Vec3::Z);
            tex_coords.push(Vec2::new((x + 1.0) / 2.0, (y + 1.0) / 2.0));
        }
    }

    Ok(MeshData::new(
        vertices,
        normals,
        tex_coords,
        lattice_elements(x_segments, y_segments),
    ))
}

/// Grid tessellated `iterations` times, the way the scene builds floors.
pub fn tessellated_grid(
    x_segments: u32,
    y_segments: u32,
    iterations: u32,
) -> GeometryResult<MeshData> {
    tessellate(iterations, &grid(x_segments, y_segments)?)
}

/// Cube spanning `[-1, 1]³` with 4 unshared vertices per face.
///
/// Faces keep their own flat normal and a full `(0,0)-(1,1)` UV square.
pub fn cube() -> MeshData {
    let mut vertices = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut tex_coords = Vec::with_capacity(24);
    let mut elements = Vec::with_capacity(36);

    for (face, (normal, corners)) in CUBE_FACES.iter().enumerate() {
        let base = (face * 4) as u16;
        vertices.extend_from_slice(corners);
        normals.extend_from_slice(&[*normal; 4]);
        tex_coords.extend_from_slice(&FACE_UVS);
        elements.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData::new(vertices, normals, tex_coords, elements)
}

/// Unit octahedron, the seed for [`octa_sphere`]. Normals point away from
/// the origin.
pub fn octahedron() -> MeshData {
    MeshData::new(
        OCTAHEDRON_VERTICES.to_vec(),
        OCTAHEDRON_VERTICES.to_vec(),
        OCTAHEDRON_UVS.to_vec(),
        OCTAHEDRON_ELEMENTS.to_vec(),
    )
}

/// Geodesic sphere: the octahedron split `iterations` times with every new
/// vertex pushed back onto the unit sphere.
pub fn octa_sphere(iterations: u32) -> GeometryResult<MeshData> {
    tessellate_with(
        iterations,
        &octahedron(),
        &TessellateOptions::default().with_unit_sphere_projection(true),
    )
}

/// Unit sphere from direct spherical parameterization.
///
/// Vertex `(i, j)` sits at azimuth `a = 2π·i/x_segments` and polar angle
/// `b = π·j/y_segments`. The seam column is duplicated so UVs stay
/// continuous, and the pole rows collapse to a single point each.
pub fn uv_sphere(x_segments: u32, y_segments: u32) -> GeometryResult<MeshData> {
    check_segments(x_segments, y_segments)?;

    let vertex_count = ((x_segments + 1) * (y_segments + 1)) as usize;
    let mut vertices = Vec::with_capacity(vertex_count);
    let mut tex_coords = Vec::with_capacity(vertex_count);

    for j in 0..=y_segments {
        for i in 0..=x_segments {
            let a = TAU * i as f32 / x_segments as f32;
            let b = PI * j as f32 / y_segments as f32;

            vertices.push(Vec3::new(a.cos() * b.sin(), b.cos(), a.sin() * b.sin()));
            tex_coords.push(Vec2::new(1.0 - a / TAU, b / PI));
        }
    }

    // Positions are already unit length
    let normals = vertices.clone();

    Ok(MeshData::new(
        vertices,
        normals,
        tex_coords,
        lattice_elements(x_segments, y_segments),
    ))
}

/// Isosceles triangle in the XY plane, facing +Z.
pub fn triangle() -> MeshData {
    let vertices = vec![
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
    ];
    let tex_coords = vertices
        .iter()
        .map(|v| Vec2::new((v.x + 1.0) / 2.0, (v.y + 1.0) / 2.0))
        .collect();

    MeshData::new(vertices, vec![Vec3::Z; 3], tex_coords, vec![0, 1, 2])
}
