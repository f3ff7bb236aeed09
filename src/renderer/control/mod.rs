//! Camera controls
//!
//! Provides camera control schemes for interactive 3D viewing.

mod orbit;

pub use orbit::OrbitControl;
