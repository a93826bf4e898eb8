//! Scene management

mod draw;
mod transform;

pub use draw::*;
pub use transform::*;

use glam::Vec3;

use crate::mesh::generators::cube;

/// A posed mesh paired with the material it is drawn with.
#[derive(Debug, Clone)]
pub struct RenderObject {
    pub node: TransformNode,
    pub material_id: usize,
}

impl RenderObject {
    pub fn new(node: TransformNode, material_id: usize) -> Self {
        Self { node, material_id }
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.node.set_pose(pose);
        self
    }
}

/// The set of objects handed to the render backend each frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<RenderObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a render object to the scene
    pub fn add_object(&mut self, object: RenderObject) -> usize {
        let id = self.objects.len();
        self.objects.push(object);
        id
    }

    /// Add three thin cubes marking the +X, +Y and +Z axes.
    ///
    /// Each marker is the cube scaled by `length` along its axis and by
    /// `width` across it, shifted so it starts at the origin. Returns the new
    /// object ids.
    pub fn add_axis_gizmo(&mut self, length: f32, width: f32, material_id: usize) -> [usize; 3] {
        let mesh = cube();
        [Vec3::X, Vec3::Y, Vec3::Z].map(|axis| {
            let scale = Vec3::select(axis.cmpeq(Vec3::ONE), Vec3::splat(length), Vec3::splat(width));
            let pose = Pose::new().with_scale(scale).with_translation(axis * length);
            self.add_object(RenderObject::new(
                TransformNode::new(mesh.clone()).with_pose(pose),
                material_id,
            ))
        })
    }

    /// Draw calls for every object whose material is ready, in insertion
    /// order. Objects with pending materials are skipped, not failed.
    pub fn draw_calls<'a, M>(&'a self, materials: &'a M) -> impl Iterator<Item = DrawCall<'a>> + 'a
    where
        M: MaterialReadiness + ?Sized + 'a,
    {
        self.objects
            .iter()
            .filter(move |object| materials.is_ready(object.material_id))
            .map(|object| DrawCall::new(&object.node, object.material_id))
    }
}
