//! Mouse-driven orbit control for a look-at camera.

use crate::renderer::viewer::Camera;
use crate::window::event::{Event, MouseButton};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

// Keeps the camera off the poles so the up vector stays well defined.
const POLE_MARGIN: f32 = 0.01;

/// Rotates, pans, and zooms a camera around a pivot point.
///
/// Left drag orbits, right or middle drag pans, and the wheel zooms within
/// the `[min_distance, max_distance]` range.
pub struct OrbitControl {
    /// Pivot the camera orbits around.
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    /// Button that started the current drag, if any. First button wins.
    active: Option<MouseButton>,
}

impl OrbitControl {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            target,
            min_distance,
            max_distance,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,
            active: None,
        }
    }

    /// Consume unhandled mouse events and move the camera accordingly.
    pub fn handle_events(&mut self, camera: &mut Camera, events: &mut [Event]) {
        for event in events.iter_mut() {
            if event.is_handled() {
                continue;
            }

            match event {
                Event::MousePress { button, .. } => {
                    if self.active.is_none() {
                        self.active = Some(*button);
                    }
                }
                Event::MouseRelease { button, .. } => {
                    if self.active == Some(*button) {
                        self.active = None;
                    }
                }
                Event::MouseMotion { delta, .. } => match self.active {
                    Some(MouseButton::Left) => {
                        self.orbit(camera, delta.0, delta.1);
                        event.set_handled();
                    }
                    Some(_) => {
                        self.pan(camera, delta.0, delta.1);
                        event.set_handled();
                    }
                    None => {}
                },
                Event::MouseWheel { delta, .. } => {
                    self.zoom(camera, delta.1);
                    event.set_handled();
                }
                _ => {}
            }
        }
    }

    /// Move the camera on its sphere around the pivot.
    ///
    /// The pose is tracked as latitude and longitude of the offset vector;
    /// latitude is clamped short of the poles.
    fn orbit(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let offset = camera.position - self.target;
        let radius = offset.length();

        let lat = (offset.y / radius).asin() + dy * self.rotate_speed;
        let lat = lat.clamp(-FRAC_PI_2 + POLE_MARGIN, FRAC_PI_2 - POLE_MARGIN);
        let lon = offset.z.atan2(offset.x) + dx * self.rotate_speed;

        camera.position = self.target
            + radius * Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin());
        camera.target = self.target;
    }

    /// Slide the pivot and the camera together in the view plane.
    fn pan(&mut self, camera: &mut Camera, dx: f32, dy: f32) {
        let forward = camera.forward();
        let right = camera.right();
        let up = right.cross(forward).normalize();

        let scale = self.pan_speed * (camera.position - self.target).length();
        let shift = (right * -dx + up * dy) * scale;

        camera.position += shift;
        camera.target += shift;
        self.target = camera.target;
    }

    /// Move the camera along its view ray, clamped to the distance range.
    fn zoom(&mut self, camera: &mut Camera, amount: f32) {
        let offset = camera.position - self.target;
        let radius = offset.length();
        let clamped =
            (radius - amount * self.zoom_speed).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + offset * (clamped / radius);
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.5, 20.0)
    }
}
