//! Data handed to and returned from the per-frame callback.

use crate::context::GpuContext;
use crate::core::texture::DepthTexture;
pub use crate::renderer::viewer::Viewport;
use crate::window::event::Event;

/// Everything the render loop provides for drawing one frame.
///
/// The GPU handles borrow from the window's graphics state, so the input
/// only lives for the duration of the callback.
pub struct FrameInput<'a> {
    /// Seconds since the render loop started.
    pub elapsed_time: f64,
    /// Seconds since the previous frame.
    pub delta_time: f64,
    /// Input events gathered since the previous frame.
    pub events: Vec<Event>,
    /// Current size of the drawable area.
    pub viewport: Viewport,
    pub ctx: &'a GpuContext,
    /// View of this frame's surface texture.
    pub surface_view: &'a wgpu::TextureView,
    /// Depth buffer matching the surface size.
    pub depth_texture: &'a DepthTexture,
    pub surface_format: wgpu::TextureFormat,
}

/// What the callback tells the render loop to do next.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Stop the render loop after this frame.
    pub exit: bool,
}

impl FrameOutput {
    /// Keep running.
    pub const fn new() -> Self {
        Self { exit: false }
    }

    /// Stop after this frame.
    pub const fn exit() -> Self {
        Self { exit: true }
    }
}
