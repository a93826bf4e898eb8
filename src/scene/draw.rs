//! Hand-off to the render backend.

use super::transform::{TransformNode, TransformUniformData};
use crate::mesh::MeshBuffers;

/// Readiness of materials, owned by the texture/material system.
///
/// The geometry side never sees texture data, only whether a material can
/// be drawn yet.
pub trait MaterialReadiness {
    fn is_ready(&self, material_id: usize) -> bool;
}

/// Indexed by material id; unknown ids are not ready.
impl MaterialReadiness for [bool] {
    fn is_ready(&self, material_id: usize) -> bool {
        self.get(material_id).copied().unwrap_or(false)
    }
}

impl MaterialReadiness for Vec<bool> {
    fn is_ready(&self, material_id: usize) -> bool {
        self.as_slice().is_ready(material_id)
    }
}

/// Everything a backend needs to issue one indexed draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub buffers: &'a MeshBuffers,
    pub uniforms: TransformUniformData,
    pub material_id: usize,
}

impl<'a> DrawCall<'a> {
    pub fn new(node: &'a TransformNode, material_id: usize) -> Self {
        Self {
            buffers: node.buffers(),
            uniforms: node.uniform_data(),
            material_id,
        }
    }

    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generators::cube;

    #[test]
    fn test_slice_readiness() {
        let ready = vec![true, false];
        assert!(ready.is_ready(0));
        assert!(!ready.is_ready(1));
        assert!(!ready.is_ready(7));
    }

    #[test]
    fn test_draw_call_borrows_node_buffers() {
        let node = TransformNode::new(cube());
        let call = DrawCall::new(&node, 3);
        assert_eq!(call.index_count(), 36);
        assert_eq!(call.material_id, 3);
        assert_eq!(call.uniforms, node.uniform_data());
    }
}
