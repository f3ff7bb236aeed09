//! Line material

use super::traits::{Material, ModelUniform};
use crate::context::GpuContext;
use crate::core::buffer::UniformBuffer;
use crate::core::pipeline::PipelineBuilder;
use crate::core::render_states::{BlendState, CullState, DepthState};
use crate::core::vertex::VertexPC;
use crate::renderer::viewer::{CameraUniform, Viewer};
use bytemuck::Zeroable;
use glam::Mat4;

/// Material for rendering lines with per-vertex colors.
pub struct LineMaterial {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBuffer<CameraUniform>,
    model: UniformBuffer<ModelUniform>,
}

impl LineMaterial {
    /// Create a new line material.
    pub fn new(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        Self::with_options(ctx, format, BlendState::Alpha, DepthState::read_write())
    }

    /// Create a new line material that ignores depth (always visible).
    pub fn no_depth(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        Self::with_options(ctx, format, BlendState::Alpha, DepthState::disabled())
    }

    /// Create a new line material with custom options.
    pub fn with_options(
        ctx: &GpuContext,
        format: wgpu::TextureFormat,
        blend: BlendState,
        depth: DepthState,
    ) -> anyhow::Result<Self> {
        let camera = UniformBuffer::new(
            ctx,
            &CameraUniform::zeroed(),
            0,
            Some("line camera uniform"),
        );
        let model = UniformBuffer::new(
            ctx,
            &ModelUniform::from_matrix(Mat4::IDENTITY),
            0,
            Some("line model uniform"),
        );

        let shader = include_str!("../../shaders/line.wgsl");
        let pipeline = PipelineBuilder::new(ctx, shader, format)
            .label("line material pipeline")
            .vertex_layout(VertexPC::layout())
            .bind_groups(camera.bind_group_layout(), model.bind_group_layout())
            .depth(depth)
            .blend(blend)
            .cull(CullState::None)
            .topology(wgpu::PrimitiveTopology::LineList)
            .build()?;

        Ok(Self {
            pipeline,
            camera,
            model,
        })
    }
}

impl Material for LineMaterial {
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
