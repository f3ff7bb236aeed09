//! Pipeline and render-pass state in crate-level terms.
//!
//! These map onto wgpu state at pipeline build and pass begin time.

/// What a render pass does with the previous contents of its attachments.
///
/// `None` loads the existing contents instead of clearing.
#[derive(Debug, Clone, Copy)]
pub struct ClearState {
    pub color: Option<[f32; 4]>,
    pub depth: Option<f32>,
}

impl ClearState {
    /// Keep both attachments as they are.
    pub const fn none() -> Self {
        Self {
            color: None,
            depth: None,
        }
    }

    /// Clear color only.
    pub fn color(color: [f32; 4]) -> Self {
        Self {
            color: Some(color),
            ..Self::none()
        }
    }

    /// Clear depth only.
    pub fn depth(depth: f32) -> Self {
        Self {
            depth: Some(depth),
            ..Self::none()
        }
    }

    /// Clear both attachments.
    pub fn color_and_depth(color: [f32; 4], depth: f32) -> Self {
        Self {
            color: Some(color),
            depth: Some(depth),
        }
    }

    pub fn color_load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        self.color.map_or(wgpu::LoadOp::Load, |[r, g, b, a]| {
            wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            })
        })
    }

    pub fn depth_load_op(&self) -> wgpu::LoadOp<f32> {
        self.depth.map_or(wgpu::LoadOp::Load, wgpu::LoadOp::Clear)
    }
}

impl Default for ClearState {
    /// Clear to opaque black with depth reset to the far plane.
    fn default() -> Self {
        Self::color_and_depth([0.0, 0.0, 0.0, 1.0], 1.0)
    }
}

const ADD_ONE_ONE: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::One,
    dst_factor: wgpu::BlendFactor::One,
    operation: wgpu::BlendOperation::Add,
};

/// Fragment blending mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// Overwrite the target.
    #[default]
    Opaque,
    /// Source-alpha blending.
    Alpha,
    /// Sum source and destination.
    Additive,
}

impl BlendState {
    pub fn to_wgpu(&self) -> Option<wgpu::BlendState> {
        match self {
            Self::Opaque => None,
            Self::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            Self::Additive => Some(wgpu::BlendState {
                color: ADD_ONE_ONE,
                alpha: ADD_ONE_ONE,
            }),
        }
    }
}

/// Depth test and write configuration.
#[derive(Debug, Clone, Copy)]
pub struct DepthState {
    pub write: bool,
    pub compare: wgpu::CompareFunction,
}

impl DepthState {
    const fn new(write: bool, compare: wgpu::CompareFunction) -> Self {
        Self { write, compare }
    }

    /// Test against the depth buffer and record new depths.
    pub fn read_write() -> Self {
        Self::new(true, wgpu::CompareFunction::Less)
    }

    /// Test against the depth buffer without recording.
    pub fn read_only() -> Self {
        Self::new(false, wgpu::CompareFunction::Less)
    }

    /// Draw regardless of depth.
    pub fn disabled() -> Self {
        Self::new(false, wgpu::CompareFunction::Always)
    }

    pub fn to_wgpu(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.write,
            depth_compare: self.compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

impl Default for DepthState {
    fn default() -> Self {
        Self::read_write()
    }
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullState {
    /// No culling.
    None,
    Front,
    #[default]
    Back,
}

impl CullState {
    pub fn to_wgpu(&self) -> Option<wgpu::Face> {
        match self {
            Self::None => None,
            Self::Front => Some(wgpu::Face::Front),
            Self::Back => Some(wgpu::Face::Back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_none_loads_both_attachments() {
        let clear = ClearState::none();
        assert!(matches!(clear.color_load_op(), wgpu::LoadOp::Load));
        assert!(matches!(clear.depth_load_op(), wgpu::LoadOp::Load));
    }

    #[test]
    fn opaque_blending_disables_the_blend_state() {
        assert!(BlendState::Opaque.to_wgpu().is_none());
        assert!(BlendState::Alpha.to_wgpu().is_some());
    }
}
