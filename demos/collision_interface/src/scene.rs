//! Collision scene
//!
//! Two boxes: a spinning probe box that is tested against the world, and a
//! registered box hovering above it. Contact points found each frame are
//! drawn as colored lines between the surface points on either body.

use glam::{EulerRot, Mat4, Quat, Vec3};
use graze::collision::{
    CollisionConfig, CollisionObject, CollisionObjectHandle, CollisionShape, CollisionWorld,
    ContactResultCallback, ManifoldPoint, Transform,
};
use graze::debug::LineBatch;

/// Half extents of the probe box.
pub const PROBE_HALF_EXTENTS: Vec3 = Vec3::ONE;
/// Half extents of the registered box.
pub const BODY_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);
/// Starting position of the probe box.
pub const PROBE_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);
/// Position of the registered box.
pub const BODY_POSITION: Vec3 = Vec3::new(0.0, 4.248, 0.0);

/// Probe spin rate around the world Y axis, radians per second.
const YAW_RATE: f32 = 0.1;
/// Probe spin rate around the world X axis, radians per second.
const PITCH_RATE: f32 = 0.05;

const PROBE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const CONTACT_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

fn initial_probe_rotation() -> Quat {
    Quat::from_xyzw(0.739, -0.204, 0.587, 0.257).normalize()
}

/// Callback that draws a line between the two surface points of each contact.
pub struct ContactLineDrawer {
    /// Line segments accumulated this frame.
    pub batch: LineBatch,
    color: [f32; 4],
}

impl ContactLineDrawer {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            batch: LineBatch::new(),
            color,
        }
    }
}

impl ContactResultCallback for ContactLineDrawer {
    fn add_single_result(&mut self, point: &ManifoldPoint) -> f32 {
        self.batch
            .draw_line(point.position_world_on_a, point.position_world_on_b, self.color);
        0.0
    }
}

/// The demo scene state, independent of any GPU resources.
///
/// The drawer is declared before the world so it is released first on drop.
pub struct Scene {
    drawer: ContactLineDrawer,
    world: CollisionWorld,
    probe: CollisionObject,
    body: CollisionObjectHandle,
}

impl Scene {
    /// Build the scene: one probe box outside the world, one registered box.
    pub fn new() -> Self {
        let config = CollisionConfig {
            gravity: Vec3::new(0.0, -10.0, 0.0),
            ..Default::default()
        };
        let mut world = CollisionWorld::new(config);

        let probe_shape = CollisionShape::cuboid(PROBE_HALF_EXTENTS)
            .with_margin(0.0)
            .handle();
        let probe = CollisionObject::new(probe_shape).with_transform(Transform {
            position: PROBE_POSITION,
            rotation: initial_probe_rotation(),
        });

        let body_shape = CollisionShape::cuboid(BODY_HALF_EXTENTS)
            .with_margin(0.0)
            .handle();
        let body = world.add_object(
            CollisionObject::new(body_shape).with_transform(Transform::from_position(BODY_POSITION)),
        );

        Self {
            drawer: ContactLineDrawer::new(CONTACT_COLOR),
            world,
            probe,
            body,
        }
    }

    /// Advance the scene by `dt` seconds and run the contact test.
    ///
    /// Spins the probe in place, redraws its wireframe, and draws one line
    /// per contact point against the registered box. Returns the number of
    /// contact points found.
    pub fn step(&mut self, dt: f32) -> usize {
        let spin = Quat::from_euler(EulerRot::YXZ, YAW_RATE * dt, PITCH_RATE * dt, 0.0);
        let transform = self.probe.world_transform().rotated_by(spin);
        self.probe.set_world_transform(transform);

        self.drawer.batch.clear();
        self.drawer.batch.draw_box(
            -PROBE_HALF_EXTENTS,
            PROBE_HALF_EXTENTS,
            transform.to_matrix(),
            PROBE_COLOR,
        );

        self.world.contact_test(&self.probe, &mut self.drawer)
    }

    /// Get the probe transform.
    pub fn probe_transform(&self) -> Transform {
        self.probe.world_transform()
    }

    /// Get the registered body's model matrix.
    pub fn body_matrix(&self) -> Mat4 {
        self.world
            .object(self.body)
            .map(|body| body.world_transform().to_matrix())
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Get the lines accumulated by the last step.
    pub fn batch(&self) -> &LineBatch {
        &self.drawer.batch
    }

    /// Get the collision world.
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_not_registered_in_the_world() {
        let scene = Scene::new();
        assert_eq!(scene.world().object_count(), 1);
    }

    #[test]
    fn world_uses_the_demo_gravity() {
        let scene = Scene::new();
        assert_eq!(scene.world().gravity(), Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn step_finds_contacts_between_the_boxes() {
        let mut scene = Scene::new();
        let contacts = scene.step(1.0 / 60.0);
        assert!(contacts >= 1, "expected at least one contact point");
        assert!(contacts <= 4, "box-box manifold reported {} points", contacts);
        // 12 wireframe edges plus one line per contact.
        assert_eq!(scene.batch().line_count(), 12 + contacts);
    }

    #[test]
    fn step_with_zero_dt_keeps_the_pose() {
        let mut scene = Scene::new();
        let before = scene.probe_transform();
        scene.step(0.0);
        let after = scene.probe_transform();

        assert_eq!(after.position, before.position);
        assert!(
            after.rotation.dot(before.rotation).abs() > 1.0 - 1e-6,
            "rotation changed with zero delta time"
        );
    }

    #[test]
    fn step_spins_the_probe_in_place() {
        let mut scene = Scene::new();
        let before = scene.probe_transform();
        scene.step(0.5);
        let after = scene.probe_transform();

        assert_eq!(after.position, before.position);
        assert!(after.rotation.dot(before.rotation).abs() < 1.0 - 1e-6);
    }

    #[test]
    fn contact_lines_connect_the_reported_surface_points() {
        let mut drawer = ContactLineDrawer::new(CONTACT_COLOR);
        let point = ManifoldPoint {
            position_world_on_a: Vec3::new(0.0, 4.0, 0.0),
            position_world_on_b: Vec3::new(0.0, 3.8, 0.0),
            normal_world_on_b: Vec3::Y,
            distance: -0.2,
            part_id_a: 0,
            part_id_b: 0,
        };
        let score = drawer.add_single_result(&point);
        assert_eq!(score, 0.0);
        assert_eq!(drawer.batch.line_count(), 1);
        let vertices = drawer.batch.vertices();
        assert_eq!(vertices[0].position, [0.0, 4.0, 0.0]);
        assert_eq!(vertices[1].position, [0.0, 3.8, 0.0]);
        assert_eq!(vertices[0].color, CONTACT_COLOR);
    }

    #[test]
    fn teardown_after_a_populated_frame_is_clean() {
        let mut scene = Scene::new();
        scene.step(1.0 / 60.0);
        // Field order drops the drawer before the world it fed.
        drop(scene);
    }

    #[test]
    fn batch_is_rebuilt_every_step() {
        let mut scene = Scene::new();
        scene.step(1.0 / 60.0);
        let first = scene.batch().line_count();
        scene.step(1.0 / 60.0);
        // Lines from the previous frame must not pile up.
        assert!(scene.batch().line_count() <= first + 4);
    }
}
