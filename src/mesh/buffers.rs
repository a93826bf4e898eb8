//! Flattened upload buffers.
//!
//! The render backend never sees a live [`MeshData`]; it receives these
//! read-only copies in vertex order.

use bytemuck::{Pod, Zeroable};

use super::data::MeshData;
use crate::math::{flatten_vec2, flatten_vec3};

/// Interleaved vertex for single-buffer layouts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

/// Planar float buffers plus a 16-bit index buffer.
///
/// Positions, normals, tangents and bitangents hold 3 floats per vertex,
/// texture coordinates 2. Tangent buffers are empty if the mesh was
/// flattened before the tangent pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub tangents: Vec<f32>,
    pub bitangents: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshBuffers {
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            positions: flatten_vec3(&mesh.vertices),
            normals: flatten_vec3(&mesh.normals),
            tex_coords: flatten_vec2(&mesh.tex_coords),
            tangents: flatten_vec3(&mesh.tangents),
            bitangents: flatten_vec3(&mesh.bitangents),
            indices: mesh.elements.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get position data as bytes
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Get normal data as bytes
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Get texture coordinate data as bytes
    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    pub fn tangent_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tangents)
    }

    pub fn bitangent_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bitangents)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl MeshData {
    /// Flatten into planar upload buffers.
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers::from_mesh(self)
    }

    /// Interleave attributes into [`Vertex`] records.
    ///
    /// Missing tangent data is written as zeros.
    pub fn interleaved(&self) -> Vec<Vertex> {
        (0..self.vertices.len())
            .map(|i| Vertex {
                position: self.vertices[i].to_array(),
                normal: self.normals.get(i).map_or([0.0; 3], |n| n.to_array()),
                uv: self.tex_coords.get(i).map_or([0.0; 2], |t| t.to_array()),
                tangent: self.tangents.get(i).map_or([0.0; 3], |t| t.to_array()),
                bitangent: self.bitangents.get(i).map_or([0.0; 3], |b| b.to_array()),
            })
            .collect()
    }
}
