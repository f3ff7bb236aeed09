//! Material trait
//!
//! The interface objects use to drive a material's pipeline and uniforms.

use crate::context::GpuContext;
use crate::renderer::viewer::Viewer;
use glam::Mat4;

/// Trait for materials that control surface appearance.
pub trait Material {
    /// Get the render pipeline.
    fn pipeline(&self) -> &wgpu::RenderPipeline;

    /// Get the camera bind group (group 0).
    fn camera_bind_group(&self) -> &wgpu::BindGroup;

    /// Get the model bind group (group 1).
    fn model_bind_group(&self) -> &wgpu::BindGroup;

    /// Update uniforms before rendering.
    fn update_uniforms(&self, ctx: &GpuContext, viewer: &dyn Viewer, model_matrix: Mat4);
}

/// Model uniform data for GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Model matrix.
    pub model: [[f32; 4]; 4],
    /// Normal matrix (inverse transpose of the model matrix).
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Create a model uniform from a model matrix.
    pub fn from_matrix(model: Mat4) -> Self {
        let normal_matrix = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn normal_matrix_rotates_directions_like_the_model() {
        let rotation = Quat::from_rotation_y(0.7);
        let model = Mat4::from_rotation_translation(rotation, Vec3::new(1.0, 2.0, 3.0));
        let uniform = ModelUniform::from_matrix(model);

        // A rigid transform has an orthonormal upper 3x3, so the inverse
        // transpose must rotate normals exactly like the model matrix.
        let normal_matrix = Mat4::from_cols_array_2d(&uniform.normal_matrix);
        let n = Vec3::new(0.0, 0.0, 1.0);
        let via_normal_matrix = normal_matrix.transform_vector3(n);
        let via_rotation = rotation * n;
        assert!((via_normal_matrix - via_rotation).length() < 1e-5);
    }
}
