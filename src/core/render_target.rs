//! Color/depth attachment pair that render passes draw into.

use crate::context::GpuContext;
use crate::core::render_states::ClearState;
use crate::core::texture::DepthTexture;

/// Borrowed views of the attachments for one frame of rendering.
///
/// The target does not own any GPU memory; it points at a surface view or
/// offscreen texture views and knows how to open passes on them.
pub struct RenderTarget<'a> {
    ctx: &'a GpuContext,
    color_view: &'a wgpu::TextureView,
    depth_view: Option<&'a wgpu::TextureView>,
    size: (u32, u32),
    format: wgpu::TextureFormat,
}

impl<'a> RenderTarget<'a> {
    /// Target an arbitrary color view, optionally with a depth view.
    pub fn new(
        ctx: &'a GpuContext,
        color_view: &'a wgpu::TextureView,
        depth_view: Option<&'a wgpu::TextureView>,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            ctx,
            color_view,
            depth_view,
            size: (width, height),
            format,
        }
    }

    /// Target the window surface for the current frame.
    pub fn from_surface(
        ctx: &'a GpuContext,
        surface_view: &'a wgpu::TextureView,
        depth_texture: Option<&'a DepthTexture>,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self::new(
            ctx,
            surface_view,
            depth_texture.map(|d| d.view()),
            width,
            height,
            format,
        )
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    pub fn aspect(&self) -> f32 {
        self.size.0 as f32 / self.size.1.max(1) as f32
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn context(&self) -> &GpuContext {
        self.ctx
    }

    fn color_attachment(&self, clear: &ClearState) -> wgpu::RenderPassColorAttachment<'a> {
        wgpu::RenderPassColorAttachment {
            view: self.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: clear.color_load_op(),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        }
    }

    fn depth_attachment(
        &self,
        clear: &ClearState,
    ) -> Option<wgpu::RenderPassDepthStencilAttachment<'a>> {
        self.depth_view
            .map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: clear.depth_load_op(),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            })
    }

    /// Open a render pass on this target's attachments.
    pub fn begin_render_pass<'p>(
        &'a self,
        encoder: &'p mut wgpu::CommandEncoder,
        clear: ClearState,
    ) -> wgpu::RenderPass<'p>
    where
        'a: 'p,
    {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("target pass"),
            color_attachments: &[Some(self.color_attachment(&clear))],
            depth_stencil_attachment: self.depth_attachment(&clear),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
