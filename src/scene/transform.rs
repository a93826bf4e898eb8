//! Transform nodes

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use crate::mesh::{MeshBuffers, MeshData};

/// Scale, Euler rotation (radians, applied X then Y then Z) and translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub scale: Vec3,
    pub rotation: Vec3,
    pub translation: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Euler angles in radians
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Model matrix `T · S · Rx · Ry · Rz`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_scale(self.scale)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }
}

/// Inverse-transpose of the model matrix's linear part.
///
/// Singular (non-finite) when a scale axis is zero.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model).inverse().transpose()
}

/// A finalized mesh with pose state and the matrices derived from it.
///
/// The matrices are recomputed whenever the pose changes and carry no state
/// of their own. The flattened buffers are built once, since the mesh is
/// immutable while owned by the node.
#[derive(Debug, Clone)]
pub struct TransformNode {
    mesh: MeshData,
    buffers: MeshBuffers,
    pose: Pose,
    model_matrix: Mat4,
    normal_matrix: Mat3,
}

impl TransformNode {
    pub fn new(mesh: MeshData) -> Self {
        let buffers = mesh.to_buffers();
        let mut node = Self {
            mesh,
            buffers,
            pose: Pose::default(),
            model_matrix: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        };
        node.recompute_matrices();
        node
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.set_pose(pose);
        self
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.recompute_matrices();
    }

    /// Replace the owned mesh; the previous one is returned to the caller.
    pub fn replace_mesh(&mut self, mesh: MeshData) -> MeshData {
        self.buffers = mesh.to_buffers();
        std::mem::replace(&mut self.mesh, mesh)
    }

    fn recompute_matrices(&mut self) {
        if self.pose.scale.cmpeq(Vec3::ZERO).any() {
            log::warn!(
                "pose scale {} has a zero axis; normal matrix is singular",
                self.pose.scale
            );
        }
        self.model_matrix = self.pose.model_matrix();
        self.normal_matrix = normal_matrix(&self.model_matrix);
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn normal_matrix(&self) -> Mat3 {
        self.normal_matrix
    }

    /// Build uniform data for shaders
    pub fn uniform_data(&self) -> TransformUniformData {
        TransformUniformData {
            model: self.model_matrix.to_cols_array(),
            normal_matrix: self.normal_matrix.to_cols_array(),
        }
    }
}

/// Per-draw transform uniforms, column-major (upload with `transpose = false`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformUniformData {
    pub model: [f32; 16],
    pub normal_matrix: [f32; 9],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generators::cube;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_pose() {
        let node = TransformNode::new(cube());
        assert_eq!(node.model_matrix(), Mat4::IDENTITY);
        assert!(node.normal_matrix().abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn test_translate_then_scale_then_rotate() {
        let pose = Pose::new()
            .with_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let m = pose.model_matrix();
        // Rz(90) maps +X to +Y, scale leaves Y alone, then translate
        let p = m.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 3.0, 3.0), 1e-5), "{p}");
        // Rz(90) maps +Y to -X, which the X scale doubles
        let q = m.transform_point3(Vec3::Y);
        assert!(q.abs_diff_eq(Vec3::new(-1.0, 2.0, 3.0), 1e-5), "{q}");
    }

    #[test]
    fn test_rotation_order_x_then_y() {
        let pose = Pose::new().with_rotation(Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let expected = Mat4::from_rotation_x(FRAC_PI_2) * Mat4::from_rotation_y(FRAC_PI_2);
        assert!(pose.model_matrix().abs_diff_eq(expected, 1e-6));
        let v = pose.model_matrix().transform_vector3(Vec3::Z);
        // Ry sends Z to X, Rx leaves X alone
        assert!(v.abs_diff_eq(Vec3::X, 1e-5), "{v}");
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        let node = TransformNode::new(cube())
            .with_pose(Pose::new().with_scale(Vec3::new(4.0, 1.0, 1.0)));
        let n = node.normal_matrix() * Vec3::new(1.0, 1.0, 0.0);
        assert!(n.abs_diff_eq(Vec3::new(0.25, 1.0, 0.0), 1e-6));
        // Transformed normals stay perpendicular to transformed surfaces
        let tangent = Mat3::from_mat4(node.model_matrix()) * Vec3::new(1.0, -1.0, 0.0);
        assert!(n.dot(tangent).abs() < 1e-5);
    }

    #[test]
    fn test_set_pose_recomputes() {
        let mut node = TransformNode::new(cube());
        node.set_pose(Pose::new().with_translation(Vec3::new(0.0, 0.0, -5.0)));
        let uniforms = node.uniform_data();
        assert_eq!(&uniforms.model[12..16], &[0.0, 0.0, -5.0, 1.0]);
        assert_eq!(uniforms.normal_matrix, Mat3::IDENTITY.to_cols_array());
        assert_eq!(std::mem::size_of::<TransformUniformData>(), 100);
    }

    #[test]
    fn test_replace_mesh_refreshes_buffers() {
        let mut node = TransformNode::new(cube());
        let old = node.replace_mesh(crate::mesh::generators::triangle());
        assert_eq!(old.vertex_count(), 24);
        assert_eq!(node.buffers().vertex_count(), 3);
        assert_eq!(node.mesh().triangle_count(), 1);
    }
}
