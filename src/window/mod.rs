//! winit-backed window and render loop.
//!
//! [`Window::render_loop`] owns the event loop; application code supplies a
//! state value and a per-frame callback that receives a [`FrameInput`].

pub mod event;
pub mod frame_io;
pub mod settings;

pub use event::{Event, Key, Modifiers, MouseButton};
pub use frame_io::{FrameInput, FrameOutput, Viewport};
pub use settings::WindowSettings;

use crate::context::GpuContext;
use crate::core::texture::DepthTexture;
use crate::core::RenderTarget;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// Pixels one scroll-wheel line is worth, to put line and pixel deltas on
/// the same scale.
const LINE_SCROLL_PX: f32 = 20.0;

/// Entry point for windowed applications.
pub struct Window {
    settings: WindowSettings,
}

impl Window {
    pub fn new(settings: WindowSettings) -> anyhow::Result<Self> {
        Ok(Self { settings })
    }

    /// Run the event loop until the window closes or the callback asks to
    /// exit. The callback is invoked once per frame.
    pub fn render_loop<F, S>(self, state: S, callback: F) -> anyhow::Result<()>
    where
        F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
        S: 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            settings: self.settings,
            state,
            callback,
            graphics: None,
            pending: Vec::new(),
            clock: FrameClock::start(),
            cursor: None,
            modifiers: Modifiers::default(),
        };
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

/// Wall-clock source for frame timing.
struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    fn start() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }

    /// Seconds since the clock started and since the previous tick.
    fn tick(&mut self) -> (f64, f64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start).as_secs_f64();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        (elapsed, delta)
    }
}

/// Window, surface, and GPU state; created once the event loop is running.
struct Graphics {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    ctx: GpuContext,
    depth: DepthTexture,
}

impl Graphics {
    fn new(settings: &WindowSettings, event_loop: &ActiveEventLoop) -> Self {
        let attrs = winit::window::WindowAttributes::default()
            .with_title(&settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(settings.width, settings.height))
            .with_resizable(settings.resizable);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");
        let (ctx, adapter) = GpuContext::request_blocking(&instance, Some(&surface))
            .expect("Failed to acquire a GPU device");

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &config);

        let depth = DepthTexture::new(&ctx, config.width, config.height, Some("window depth"));

        Self {
            window,
            surface,
            config,
            ctx,
            depth,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.ctx.device, &self.config);
        self.depth.resize(&self.ctx, width, height);
    }
}

struct App<S, F> {
    settings: WindowSettings,
    state: S,
    callback: F,
    graphics: Option<Graphics>,
    /// Events gathered since the last frame was delivered.
    pending: Vec<Event>,
    clock: FrameClock,
    /// Last cursor position, once the cursor has entered the window.
    cursor: Option<(f32, f32)>,
    modifiers: Modifiers,
}

impl<S, F> App<S, F>
where
    F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    /// Map a winit input event onto the crate's event type.
    fn translate_input(&mut self, event: &WindowEvent) -> Option<Event> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = (position.x as f32, position.y as f32);
                let last = self.cursor.replace(position).unwrap_or(position);
                Some(Event::MouseMotion {
                    delta: (position.0 - last.0, position.1 - last.1),
                    position,
                    modifiers: self.modifiers,
                    handled: false,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match *button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return None,
                };
                let position = self.cursor.unwrap_or_default();
                Some(match state {
                    ElementState::Pressed => Event::MousePress {
                        button,
                        position,
                        modifiers: self.modifiers,
                        handled: false,
                    },
                    ElementState::Released => Event::MouseRelease {
                        button,
                        position,
                        modifiers: self.modifiers,
                        handled: false,
                    },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match *delta {
                    winit::event::MouseScrollDelta::LineDelta(x, y) => {
                        (x * LINE_SCROLL_PX, y * LINE_SCROLL_PX)
                    }
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        (pos.x as f32, pos.y as f32)
                    }
                };
                Some(Event::MouseWheel {
                    delta,
                    position: self.cursor.unwrap_or_default(),
                    modifiers: self.modifiers,
                    handled: false,
                })
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let key = Key::from_winit(&key_event.logical_key)?;
                Some(match key_event.state {
                    ElementState::Pressed => Event::KeyPress {
                        key,
                        modifiers: self.modifiers,
                        handled: false,
                    },
                    ElementState::Released => Event::KeyRelease {
                        key,
                        modifiers: self.modifiers,
                        handled: false,
                    },
                })
            }
            _ => None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let (elapsed_time, delta_time) = self.clock.tick();

        let surface_texture = match graphics.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics
                    .surface
                    .configure(&graphics.ctx.device, &graphics.config);
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let input = FrameInput {
            elapsed_time,
            delta_time,
            events: std::mem::take(&mut self.pending),
            viewport: Viewport::new(0, 0, graphics.config.width, graphics.config.height),
            ctx: &graphics.ctx,
            surface_view: &view,
            depth_texture: &graphics.depth,
            surface_format: graphics.config.format,
        };
        let output = (self.callback)(&mut self.state, input);

        surface_texture.present();

        if output.exit {
            event_loop.exit();
        }
    }
}

impl<S, F> ApplicationHandler for App<S, F>
where
    F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_none() {
            self.graphics = Some(Graphics::new(&self.settings, event_loop));
            // Frame timing starts once the device is ready.
            self.clock = FrameClock::start();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = Modifiers::from_winit(state.state());
            }
            WindowEvent::Resized(size) => {
                if let Some(graphics) = self.graphics.as_mut() {
                    graphics.resize(size.width, size.height);
                }
                self.pending.push(Event::Resize {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(translated) = self.translate_input(&other) {
                    self.pending.push(translated);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

/// Render target covering the whole window surface for this frame.
pub fn screen_target<'a>(input: &'a FrameInput<'a>) -> RenderTarget<'a> {
    RenderTarget::from_surface(
        input.ctx,
        input.surface_view,
        Some(input.depth_texture),
        input.viewport.width,
        input.viewport.height,
        input.surface_format,
    )
}
