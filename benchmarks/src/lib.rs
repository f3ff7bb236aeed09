//! Shared setup helpers for the contact query benchmarks.

use glam::{Quat, Vec3};
use graze::collision::{
    CollisionConfig, CollisionObject, CollisionShape, CollisionWorld, ContactResultCallback,
    ManifoldPoint, ShapeHandle, Transform,
};

/// Callback that counts contact points and does no other work.
#[derive(Default)]
pub struct CountContacts(pub usize);

impl ContactResultCallback for CountContacts {
    fn add_single_result(&mut self, _point: &ManifoldPoint) -> f32 {
        self.0 += 1;
        0.0
    }
}

/// A cube shape with the margin disabled.
pub fn sharp_box(half: f32) -> ShapeHandle {
    CollisionShape::cuboid(Vec3::splat(half))
        .with_margin(0.0)
        .handle()
}

/// A cube shape with the default margin.
pub fn rounded_box(half: f32) -> ShapeHandle {
    CollisionShape::cuboid(Vec3::splat(half)).handle()
}

/// A world with `n` boxes laid out on a grid, spaced so none of them touch
/// each other.
pub fn setup_box_grid(n: usize) -> CollisionWorld {
    let mut world = CollisionWorld::new(CollisionConfig::default());
    let shape = sharp_box(0.5);
    let side = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let x = (i % side) as f32 * 3.0;
        let z = (i / side) as f32 * 3.0;
        world.add_object(
            CollisionObject::new(shape.clone())
                .with_transform(Transform::from_position(Vec3::new(x, 0.0, z))),
        );
    }
    world
}

/// A probe that overlaps the first couple of boxes of [`setup_box_grid`] and
/// gets AABB-culled against the rest.
pub fn grid_probe() -> CollisionObject {
    CollisionObject::new(sharp_box(2.0))
        .with_transform(Transform::from_position(Vec3::new(1.5, 0.0, 0.0)))
}

/// The two-box arrangement from the collision interface demo: a tilted unit
/// box probing a half-size box hovering above it.
pub fn setup_demo_pair() -> (CollisionWorld, CollisionObject) {
    let mut world = CollisionWorld::new(CollisionConfig {
        gravity: Vec3::new(0.0, -10.0, 0.0),
        ..Default::default()
    });
    world.add_object(
        CollisionObject::new(sharp_box(0.5))
            .with_transform(Transform::from_position(Vec3::new(0.0, 4.248, 0.0))),
    );
    let probe = CollisionObject::new(sharp_box(1.0)).with_transform(Transform::new(
        Vec3::new(0.0, 3.0, 0.0),
        Quat::from_xyzw(0.739, -0.204, 0.587, 0.257).normalize(),
    ));
    (world, probe)
}
