//! GPU context: shared device and queue handles.

use std::sync::Arc;

/// Device/queue pair every GPU resource in the crate is created from.
///
/// Cloning is cheap; both handles are reference counted.
#[derive(Clone)]
pub struct GpuContext {
    /// Device used to create GPU resources.
    pub device: Arc<wgpu::Device>,
    /// Queue used to submit command buffers.
    pub queue: Arc<wgpu::Queue>,
}

impl GpuContext {
    /// Wrap an existing device and queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
        }
    }

    /// Request a device from `instance`, compatible with `surface` if given.
    ///
    /// The adapter is returned alongside the context so callers that present
    /// to a surface can query its capabilities.
    pub async fn request_async(
        instance: &wgpu::Instance,
        surface: Option<&wgpu::Surface<'_>>,
    ) -> anyhow::Result<(Self, wgpu::Adapter)> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: surface,
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("graze device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        Ok((Self::new(device, queue), adapter))
    }

    /// Blocking variant of [`request_async`](Self::request_async).
    pub fn request_blocking(
        instance: &wgpu::Instance,
        surface: Option<&wgpu::Surface<'_>>,
    ) -> anyhow::Result<(Self, wgpu::Adapter)> {
        pollster::block_on(Self::request_async(instance, surface))
    }

    /// Submit command buffers to the queue.
    pub fn submit<I: IntoIterator<Item = wgpu::CommandBuffer>>(&self, command_buffers: I) {
        self.queue.submit(command_buffers);
    }

    /// Create a command encoder.
    pub fn create_encoder(&self, label: Option<&str>) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label })
    }
}

impl std::fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuContext").finish()
    }
}
