//! Material abstractions
//!
//! Provides material types for controlling surface appearance.

mod color;
mod line;
mod traits;

pub use color::ColorMaterial;
pub use line::LineMaterial;
pub use traits::{Material, ModelUniform};
