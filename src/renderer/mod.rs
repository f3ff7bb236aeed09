//! High-level rendering abstractions
//!
//! This module provides cameras, materials, geometry, and renderable objects.

#[cfg(feature = "window")]
pub mod control;
pub mod geometry;
pub mod material;
pub mod object;
pub mod viewer;

#[cfg(feature = "window")]
pub use control::OrbitControl;
pub use geometry::{Aabb, BoundingBoxMesh, Geometry, Lines, Mesh};
pub use material::{ColorMaterial, LineMaterial, Material, ModelUniform};
pub use object::{Gm, Object};
pub use viewer::{Camera, CameraUniform, Projection, Viewer, Viewport};
