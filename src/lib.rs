//! Collision contact testing with a wgpu debug-draw harness.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **collision** - Shapes, collision objects, and the contact-test world
//! 2. **context** - Core wgpu wrapper (Device, Queue)
//! 3. **core** - GPU primitives (buffers, textures, pipelines)
//! 4. **renderer** - High-level rendering (cameras, materials, geometry)
//! 5. **debug** - Per-frame line batches for contact visualization
//! 6. **window** - Window management with winit (feature = "window")

pub mod collision;
pub mod context;
pub mod core;
pub mod debug;
pub mod renderer;

#[cfg(feature = "window")]
pub mod window;

// Re-export commonly used types
pub use context::GpuContext;

pub use collision::{
    ClosestPoints, CollisionConfig, CollisionObject, CollisionObjectHandle, CollisionShape,
    CollisionWorld, ContactResultCallback, ManifoldPoint, ShapeHandle, ShapeKind, Transform,
    DEFAULT_MARGIN,
};

pub use self::core::{
    BlendState, ClearState, CullState, DepthState, DepthTexture, IndexBuffer, PipelineBuilder,
    RenderTarget, UniformBuffer, Vertex, VertexBuffer, VertexPC,
};

pub use renderer::{
    Aabb, BoundingBoxMesh, Camera, ColorMaterial, Geometry, Gm, LineMaterial, Lines, Material,
    Mesh, ModelUniform, Object, Projection, Viewer,
};

#[cfg(feature = "window")]
pub use renderer::OrbitControl;

pub use debug::{DebugDraw, LineBatch};

#[cfg(feature = "window")]
pub use window::{
    screen_target, Event, FrameInput, FrameOutput, Key, Modifiers, MouseButton, Viewport, Window,
    WindowSettings,
};

// Re-export glam for convenience
pub use glam;
