//! Render pipeline construction.
//!
//! Every pipeline in this crate follows one recipe: a WGSL module with
//! `vs_main`/`fs_main` entry points, one vertex stream at slot 0, and the
//! camera/model uniform pair at bind groups 0 and 1. The builder takes that
//! recipe plus the crate's render states and produces the wgpu pipeline.

use anyhow::Context as _;

use crate::context::GpuContext;
use crate::core::render_states::{BlendState, CullState, DepthState};
use crate::core::texture::DepthTexture;

const VS_ENTRY: &str = "vs_main";
const FS_ENTRY: &str = "fs_main";

/// Assembles a render pipeline from WGSL source and render states.
pub struct PipelineBuilder<'a> {
    ctx: &'a GpuContext,
    shader: &'a str,
    format: wgpu::TextureFormat,
    label: Option<&'a str>,
    vertex_layout: Option<wgpu::VertexBufferLayout<'a>>,
    groups: Option<[&'a wgpu::BindGroupLayout; 2]>,
    depth: Option<DepthState>,
    blend: BlendState,
    cull: CullState,
    topology: wgpu::PrimitiveTopology,
}

impl<'a> PipelineBuilder<'a> {
    /// Start a pipeline from WGSL source and the color target format.
    ///
    /// Defaults to opaque blending, back-face culling, a triangle list, and
    /// no depth attachment.
    pub fn new(ctx: &'a GpuContext, shader: &'a str, format: wgpu::TextureFormat) -> Self {
        Self {
            ctx,
            shader,
            format,
            label: None,
            vertex_layout: None,
            groups: None,
            depth: None,
            blend: BlendState::Opaque,
            cull: CullState::Back,
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }

    /// Name the pipeline in validation messages.
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Describe the vertex stream.
    pub fn vertex_layout(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_layout = Some(layout);
        self
    }

    /// Bind the camera (group 0) and model (group 1) uniform layouts.
    pub fn bind_groups(
        mut self,
        camera: &'a wgpu::BindGroupLayout,
        model: &'a wgpu::BindGroupLayout,
    ) -> Self {
        self.groups = Some([camera, model]);
        self
    }

    /// Attach depth testing against the shared depth format.
    pub fn depth(mut self, state: DepthState) -> Self {
        self.depth = Some(state);
        self
    }

    /// Replace the opaque default blending.
    pub fn blend(mut self, state: BlendState) -> Self {
        self.blend = state;
        self
    }

    /// Replace the back-face default culling.
    pub fn cull(mut self, state: CullState) -> Self {
        self.cull = state;
        self
    }

    /// Replace the triangle-list default topology.
    pub fn topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Create the pipeline.
    pub fn build(self) -> anyhow::Result<wgpu::RenderPipeline> {
        let vertex_layout = self.vertex_layout.context("A vertex layout is required")?;
        let groups = self.groups.context("Bind group layouts are required")?;

        let device = &self.ctx.device;
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: self.label,
            source: wgpu::ShaderSource::Wgsl(self.shader.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: self.label,
            bind_group_layouts: &groups,
            immediate_size: 0,
        });

        let target = wgpu::ColorTargetState {
            format: self.format,
            blend: self.blend.to_wgpu(),
            write_mask: wgpu::ColorWrites::ALL,
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VS_ENTRY),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FS_ENTRY),
                targets: &[Some(target)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: self.cull.to_wgpu(),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: self.depth.map(|state| state.to_wgpu(DepthTexture::FORMAT)),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview_mask: None,
            cache: None,
        });

        Ok(pipeline)
    }
}
