//! Vertex color material

use super::traits::{Material, ModelUniform};
use crate::context::GpuContext;
use crate::core::buffer::UniformBuffer;
use crate::core::pipeline::PipelineBuilder;
use crate::core::render_states::DepthState;
use crate::core::vertex::Vertex;
use crate::renderer::viewer::{CameraUniform, Viewer};
use bytemuck::Zeroable;
use glam::Mat4;

/// Material for vertex-colored meshes, shaded by a fixed directional light.
pub struct ColorMaterial {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBuffer<CameraUniform>,
    model: UniformBuffer<ModelUniform>,
}

impl ColorMaterial {
    /// Create a new color material.
    pub fn new(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let camera = UniformBuffer::new(
            ctx,
            &CameraUniform::zeroed(),
            0,
            Some("color camera uniform"),
        );
        let model = UniformBuffer::new(
            ctx,
            &ModelUniform::from_matrix(Mat4::IDENTITY),
            0,
            Some("color model uniform"),
        );

        let shader = include_str!("../../shaders/color.wgsl");
        let pipeline = PipelineBuilder::new(ctx, shader, format)
            .label("color material pipeline")
            .vertex_layout(Vertex::layout())
            .bind_groups(camera.bind_group_layout(), model.bind_group_layout())
            .depth(DepthState::read_write())
            .build()?;

        Ok(Self {
            pipeline,
            camera,
            model,
        })
    }
}

impl Material for ColorMaterial {
    fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    fn camera_bind_group(&self) -> &wgpu::BindGroup {
        self.camera.bind_group()
    }

    fn model_bind_group(&self) -> &wgpu::BindGroup {
        self.model.bind_group()
    }

    fn update_uniforms(&self, ctx: &GpuContext, viewer: &dyn Viewer, model_matrix: Mat4) {
        self.camera.update(ctx, &CameraUniform::from_viewer(viewer));
        self.model.update(ctx, &ModelUniform::from_matrix(model_matrix));
    }
}
