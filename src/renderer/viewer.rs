//! Cameras and the viewer abstraction used by materials.

use glam::{Mat4, Vec3};

/// Rectangular region of the render target, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width over height. A zero height yields the aspect of a 1-pixel row.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// How camera space maps to clip space.
#[derive(Debug, Clone, Copy)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov: f32,
        /// Width over height.
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        /// Visible width in world units.
        width: f32,
        /// Visible height in world units.
        height: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Perspective projection. The field of view is given in degrees.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Orthographic projection centered on the view axis.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::Orthographic {
            width,
            height,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov, aspect, near, far),
            Self::Orthographic {
                width,
                height,
                near,
                far,
            } => {
                let (hw, hh) = (0.5 * width, 0.5 * height);
                Mat4::orthographic_rh(-hw, hw, -hh, hh, near, far)
            }
        }
    }

    /// Track a resized viewport. Orthographic projections keep their extents.
    pub fn set_aspect(&mut self, aspect: f32) {
        if let Self::Perspective { aspect: a, .. } = self {
            *a = aspect;
        }
    }
}

/// Anything that can supply view and projection matrices for a draw.
///
/// Materials read the viewer once per object when uniforms are updated.
pub trait Viewer {
    /// World-space eye position.
    fn position(&self) -> Vec3;

    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self) -> Mat4;

    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn viewport(&self) -> Viewport;
}

/// A look-at camera.
///
/// The pose is the `position`/`target`/`up` triple; controls mutate those
/// fields directly and the matrices are derived on demand.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
    viewport: Viewport,
}

impl Camera {
    fn with_projection(position: Vec3, target: Vec3, up: Vec3, projection: Projection) -> Self {
        Self {
            position,
            target,
            up,
            projection,
            viewport: Viewport::new(0, 0, 1, 1),
        }
    }

    /// Perspective camera looking from `position` toward `target`.
    pub fn new_perspective(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::with_projection(
            position,
            target,
            up,
            Projection::perspective(fov_degrees, aspect, near, far),
        )
    }

    /// Orthographic camera looking from `position` toward `target`.
    pub fn new_orthographic(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::with_projection(
            position,
            target,
            up,
            Projection::orthographic(width, height, near, far),
        )
    }

    /// Adopt the viewport and keep the projection aspect in sync with it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.projection.set_aspect(viewport.aspect());
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Unit vector to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }
}

impl Viewer for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Per-view uniform block shared by all materials (group 0, binding 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position; w is padding.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn from_viewer(viewer: &dyn Viewer) -> Self {
        Self {
            view_proj: viewer.view_projection_matrix().to_cols_array_2d(),
            eye: viewer.position().extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_viewport_updates_perspective_aspect() {
        let mut camera = Camera::new_perspective(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            45.0,
            1.0,
            0.1,
            100.0,
        );
        camera.set_viewport(Viewport::new(0, 0, 1600, 800));
        match camera.projection {
            Projection::Perspective { aspect, .. } => assert_eq!(aspect, 2.0),
            _ => panic!("Expected perspective projection"),
        }
    }

    #[test]
    fn camera_axes_are_orthogonal() {
        let camera = Camera::new_perspective(
            Vec3::new(3.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1.0,
            0.1,
            100.0,
        );
        assert!(camera.forward().dot(camera.right()).abs() < 1e-6);
    }

    #[test]
    fn camera_uniform_carries_eye_position() {
        let camera = Camera::new_perspective(
            Vec3::new(6.0, 4.0, 1.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::Y,
            60.0,
            1.6,
            0.1,
            100.0,
        );
        let uniform = CameraUniform::from_viewer(&camera);
        assert_eq!(uniform.eye, [6.0, 4.0, 1.0, 1.0]);

        let expected = camera.projection_matrix() * camera.view_matrix();
        assert_eq!(uniform.view_proj, expected.to_cols_array_2d());
    }
}
