//! The collision world: object registration and contact queries.

use glam::Vec3;
use parry3d::bounding_volume::BoundingVolume;
use parry3d::math::{Isometry, Real};
use parry3d::query::{self, ContactManifold, DefaultQueryDispatcher, PersistentQueryDispatcher};

use super::contact::{ContactResultCallback, ManifoldPoint};
use super::object::CollisionObject;
use super::{point_to_vec3, to_isometry, vector_to_vec3};

/// Configuration for a collision world.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Gravity vector. Stored for consumers that integrate motion; contact
    /// queries do not read it. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Largest separation distance at which a manifold point is still
    /// reported. Zero reports touching or penetrating points only.
    /// Default: 0.
    pub contact_prediction: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            contact_prediction: 0.0,
        }
    }
}

/// Identifies an object registered with a [`CollisionWorld`].
///
/// Handles stay valid until the object is removed; a removed handle resolves
/// to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionObjectHandle(usize);

/// Result of a closest-points query between two objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClosestPoints {
    /// The shapes touch or interpenetrate.
    Intersecting,
    /// The closest world-space point on each shape, within the requested
    /// distance.
    WithinMargin(Vec3, Vec3),
    /// The shapes are farther apart than the requested distance.
    Disjoint,
}

/// Holds registered collision objects and answers contact queries against
/// them.
///
/// The world never moves objects on its own; callers update transforms and
/// run queries from a single thread. Probe objects passed to
/// [`contact_test`](Self::contact_test) do not have to be registered, which
/// keeps one-shot probes out of the registered set entirely.
pub struct CollisionWorld {
    config: CollisionConfig,
    objects: Vec<Option<CollisionObject>>,
}

impl CollisionWorld {
    /// Create an empty world with the given configuration.
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
        }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// Register an object, transferring ownership to the world.
    ///
    /// Slots freed by [`remove_object`](Self::remove_object) are reused.
    pub fn add_object(&mut self, object: CollisionObject) -> CollisionObjectHandle {
        for (index, slot) in self.objects.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(object);
                return CollisionObjectHandle(index);
            }
        }
        self.objects.push(Some(object));
        CollisionObjectHandle(self.objects.len() - 1)
    }

    /// Unregister an object, handing ownership back to the caller.
    pub fn remove_object(&mut self, handle: CollisionObjectHandle) -> Option<CollisionObject> {
        self.objects.get_mut(handle.0).and_then(Option::take)
    }

    pub fn object(&self, handle: CollisionObjectHandle) -> Option<&CollisionObject> {
        self.objects.get(handle.0).and_then(Option::as_ref)
    }

    pub fn object_mut(&mut self, handle: CollisionObjectHandle) -> Option<&mut CollisionObject> {
        self.objects.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Iterate over the registered objects with their handles.
    pub fn objects(&self) -> impl Iterator<Item = (CollisionObjectHandle, &CollisionObject)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|obj| (CollisionObjectHandle(index), obj)))
    }

    pub fn object_count(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    /// Test one probe object against every registered object.
    ///
    /// The probe does not have to be registered. Registered objects are first
    /// offered to the callback's pair filter, then culled by world AABB;
    /// surviving pairs run the narrow phase and the callback receives one
    /// [`ManifoldPoint`] per accepted contact. Returns the number of points
    /// reported.
    pub fn contact_test(
        &self,
        probe: &CollisionObject,
        callback: &mut dyn ContactResultCallback,
    ) -> usize {
        let probe_pos = to_isometry(&probe.world_transform());
        let slack = self.config.contact_prediction.max(0.0);
        let probe_aabb = probe
            .shape()
            .backend()
            .compute_aabb(&probe_pos)
            .loosened(slack);

        let mut reported = 0;
        for body in self.objects.iter().flatten() {
            if !callback.needs_collision(body) {
                continue;
            }
            let body_pos = to_isometry(&body.world_transform());
            let body_aabb = body.shape().backend().compute_aabb(&body_pos);
            if !probe_aabb.intersects(&body_aabb) {
                continue;
            }
            reported += self.report_pair(probe, &probe_pos, body, &body_pos, callback);
        }
        reported
    }

    /// Test one explicit pair of objects, registered or not.
    ///
    /// Goes straight to the narrow phase: no pair filter, no AABB cull.
    /// Returns the number of points reported.
    pub fn contact_pair_test(
        &self,
        a: &CollisionObject,
        b: &CollisionObject,
        callback: &mut dyn ContactResultCallback,
    ) -> usize {
        let pos_a = to_isometry(&a.world_transform());
        let pos_b = to_isometry(&b.world_transform());
        self.report_pair(a, &pos_a, b, &pos_b, callback)
    }

    /// Closest points between two objects, if they come within
    /// `max_distance` of each other.
    pub fn closest_points(
        &self,
        a: &CollisionObject,
        b: &CollisionObject,
        max_distance: f32,
    ) -> ClosestPoints {
        let pos_a = to_isometry(&a.world_transform());
        let pos_b = to_isometry(&b.world_transform());
        match query::closest_points(
            &pos_a,
            a.shape().backend(),
            &pos_b,
            b.shape().backend(),
            max_distance,
        ) {
            Ok(query::ClosestPoints::Intersecting) => ClosestPoints::Intersecting,
            Ok(query::ClosestPoints::WithinMargin(p1, p2)) => {
                ClosestPoints::WithinMargin(point_to_vec3(p1), point_to_vec3(p2))
            }
            Ok(query::ClosestPoints::Disjoint) | Err(_) => ClosestPoints::Disjoint,
        }
    }

    /// Run the narrow phase for one pair and feed the callback.
    ///
    /// Unsupported shape pairs degrade to zero contacts; the callback path
    /// never fails.
    fn report_pair(
        &self,
        a: &CollisionObject,
        pos_a: &Isometry<Real>,
        b: &CollisionObject,
        pos_b: &Isometry<Real>,
        callback: &mut dyn ContactResultCallback,
    ) -> usize {
        let dispatcher = DefaultQueryDispatcher;
        let pos12 = pos_a.inv_mul(pos_b);
        let mut manifolds: Vec<ContactManifold<(), ()>> = Vec::new();
        let mut workspace = None;

        if dispatcher
            .contact_manifolds(
                &pos12,
                a.shape().backend(),
                b.shape().backend(),
                self.config.contact_prediction,
                &mut manifolds,
                &mut workspace,
            )
            .is_err()
        {
            return 0;
        }

        let mut reported = 0;
        for manifold in &manifolds {
            let pose_a = manifold.subshape_pos1.map_or(*pos_a, |sub| pos_a * sub);
            let pose_b = manifold.subshape_pos2.map_or(*pos_b, |sub| pos_b * sub);
            let normal_world_on_b = vector_to_vec3(pose_b.rotation * manifold.local_n2);

            for point in &manifold.points {
                if point.dist > self.config.contact_prediction {
                    continue;
                }
                let manifold_point = ManifoldPoint {
                    position_world_on_a: point_to_vec3(pose_a * point.local_p1),
                    position_world_on_b: point_to_vec3(pose_b * point.local_p2),
                    normal_world_on_b,
                    distance: point.dist,
                    part_id_a: manifold.subshape1,
                    part_id_b: manifold.subshape2,
                };
                callback.add_single_result(&manifold_point);
                reported += 1;
            }
        }
        reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionShape, ShapeHandle, Transform, DEFAULT_MARGIN};
    use glam::Quat;
    use std::f32::consts::FRAC_PI_4;

    #[derive(Default)]
    struct Recorder {
        points: Vec<ManifoldPoint>,
        skip_user_index: Option<i32>,
    }

    impl ContactResultCallback for Recorder {
        fn needs_collision(&self, body: &CollisionObject) -> bool {
            self.skip_user_index != Some(body.user_index())
        }

        fn add_single_result(&mut self, point: &ManifoldPoint) -> f32 {
            self.points.push(*point);
            0.0
        }
    }

    fn sharp_cube(half: f32) -> ShapeHandle {
        CollisionShape::cuboid(Vec3::splat(half))
            .with_margin(0.0)
            .handle()
    }

    fn at(x: f32, y: f32, z: f32) -> Transform {
        Transform::from_position(Vec3::new(x, y, z))
    }

    #[test]
    fn test_no_contacts_when_separated() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        world.add_object(CollisionObject::new(sharp_cube(0.5)).with_transform(at(0.0, 4.0, 0.0)));

        let probe = CollisionObject::new(sharp_cube(1.0));
        let mut recorder = Recorder::default();

        assert_eq!(world.contact_test(&probe, &mut recorder), 0);
        assert!(
            recorder.points.is_empty(),
            "separated shapes must not invoke the callback"
        );
    }

    #[test]
    fn test_overlapping_boxes_report_manifold_points() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        world.add_object(CollisionObject::new(sharp_cube(0.5)).with_transform(at(0.0, 1.4, 0.0)));

        let probe = CollisionObject::new(sharp_cube(1.0));
        let mut recorder = Recorder::default();
        let reported = world.contact_test(&probe, &mut recorder);

        assert_eq!(reported, recorder.points.len());
        assert!(
            (1..=4).contains(&reported),
            "box-box overlap should report between one and four points, got {}",
            reported
        );

        for point in &recorder.points {
            assert!(point.is_penetrating(), "stacked boxes interpenetrate");
            assert!(
                (point.distance + 0.1).abs() < 1e-3,
                "expected 0.1 penetration, got {}",
                point.distance
            );
            assert!(
                (point.position_world_on_a.y - 1.0).abs() < 1e-3,
                "point on A should sit on its top face, got {:?}",
                point.position_world_on_a
            );
            assert!(
                (point.position_world_on_b.y - 0.9).abs() < 1e-3,
                "point on B should sit on its bottom face, got {:?}",
                point.position_world_on_b
            );
            assert!(
                point.normal_world_on_b.y.abs() > 0.99,
                "contact normal should align with the stacking axis, got {:?}",
                point.normal_world_on_b
            );
            assert_eq!(point.part_id_a, 0);
            assert_eq!(point.part_id_b, 0);
        }
    }

    #[test]
    fn test_pair_filter_skips_bodies() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        world.add_object(
            CollisionObject::new(sharp_cube(0.5))
                .with_transform(at(0.6, 0.0, 0.0))
                .with_user_index(1),
        );
        world.add_object(
            CollisionObject::new(sharp_cube(0.5))
                .with_transform(at(-0.6, 0.0, 0.0))
                .with_user_index(2),
        );

        let probe = CollisionObject::new(sharp_cube(1.0));

        let mut all = Recorder::default();
        assert!(world.contact_test(&probe, &mut all) >= 2, "both bodies overlap the probe");

        let mut filtered = Recorder {
            skip_user_index: Some(1),
            ..Recorder::default()
        };
        let reported = world.contact_test(&probe, &mut filtered);
        assert!(reported >= 1);
        assert!(
            filtered.points.iter().all(|p| p.position_world_on_b.x < 0.0),
            "filtered query should only see the body on the negative side"
        );
    }

    #[test]
    fn test_contact_prediction_window() {
        // Face gap of 0.05 between the probe's top and the body's bottom.
        let body = CollisionObject::new(sharp_cube(0.5)).with_transform(at(0.0, 1.55, 0.0));
        let probe = CollisionObject::new(sharp_cube(1.0));

        let mut strict_world = CollisionWorld::new(CollisionConfig::default());
        strict_world.add_object(body.clone());
        let mut recorder = Recorder::default();
        assert_eq!(
            strict_world.contact_test(&probe, &mut recorder),
            0,
            "zero prediction reports touching or penetrating points only"
        );

        let mut loose_world = CollisionWorld::new(CollisionConfig {
            contact_prediction: 0.1,
            ..CollisionConfig::default()
        });
        loose_world.add_object(body);
        let mut recorder = Recorder::default();
        let reported = loose_world.contact_test(&probe, &mut recorder);
        assert!(reported >= 1, "prediction of 0.1 should admit a 0.05 gap");
        for point in &recorder.points {
            assert!(!point.is_penetrating());
            assert!(
                point.distance <= 0.1 + 1e-4,
                "reported distance should stay inside the prediction window, got {}",
                point.distance
            );
        }
    }

    #[test]
    fn test_zero_margin_matches_exact_geometry() {
        // A cube rotated 45 degrees presents an edge to the face below it.
        // The sharp edge reaches 0.008 into the face; the default margin
        // rounds the edge off and falls about 0.009 short of it.
        let world = CollisionWorld::new(CollisionConfig::default());
        let base = CollisionObject::new(sharp_cube(1.0));
        let tilted = Transform::new(
            Vec3::new(0.0, 1.69911, 0.0),
            Quat::from_rotation_z(FRAC_PI_4),
        );

        let sharp = CollisionObject::new(
            CollisionShape::cuboid(Vec3::splat(0.5)).with_margin(0.0).handle(),
        )
        .with_transform(tilted);
        let rounded = CollisionObject::new(
            CollisionShape::cuboid(Vec3::splat(0.5))
                .with_margin(DEFAULT_MARGIN)
                .handle(),
        )
        .with_transform(tilted);

        let mut recorder = Recorder::default();
        assert!(
            world.contact_pair_test(&base, &sharp, &mut recorder) >= 1,
            "the sharp edge grazes the face"
        );

        let mut recorder = Recorder::default();
        assert_eq!(
            world.contact_pair_test(&base, &rounded, &mut recorder),
            0,
            "the rounded edge falls short of the face"
        );
    }

    #[test]
    fn test_remove_object_clears_contacts() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        let handle = world
            .add_object(CollisionObject::new(sharp_cube(0.5)).with_transform(at(0.0, 1.2, 0.0)));
        let probe = CollisionObject::new(sharp_cube(1.0));

        let mut recorder = Recorder::default();
        assert!(world.contact_test(&probe, &mut recorder) >= 1);

        let removed = world.remove_object(handle);
        assert!(removed.is_some(), "removal should hand the object back");
        assert!(world.object(handle).is_none(), "the handle is stale after removal");
        assert_eq!(world.object_count(), 0);

        let mut recorder = Recorder::default();
        assert_eq!(world.contact_test(&probe, &mut recorder), 0);
    }

    #[test]
    fn test_recorder_may_outlive_the_world() {
        let mut recorder = Recorder::default();
        let mut world = CollisionWorld::new(CollisionConfig::default());
        world.add_object(CollisionObject::new(sharp_cube(0.5)).with_transform(at(0.0, 1.2, 0.0)));
        let probe = CollisionObject::new(sharp_cube(1.0));

        assert!(world.contact_test(&probe, &mut recorder) >= 1);
        drop(world);
        // Points were copied out during the callback, so they survive the
        // world in either drop order.
        assert!(recorder.points.iter().all(|p| p.is_penetrating()));
    }

    #[test]
    fn test_slots_are_reused() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        let first = world.add_object(CollisionObject::new(sharp_cube(0.5)));
        let second = world.add_object(CollisionObject::new(sharp_cube(0.5)));
        world.remove_object(first);

        let third = world
            .add_object(CollisionObject::new(sharp_cube(0.5)).with_user_index(7));
        assert_eq!(third, first, "freed slots should be reused");
        assert_ne!(third, second);
        assert_eq!(world.object(third).map(|o| o.user_index()), Some(7));
        assert_eq!(world.object_count(), 2);
    }

    #[test]
    fn test_gravity_is_stored_configuration() {
        let mut world = CollisionWorld::new(CollisionConfig::default());
        world.set_gravity(Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(world.gravity(), Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn test_closest_points_between_spheres() {
        let world = CollisionWorld::new(CollisionConfig::default());
        let sphere = CollisionShape::sphere(0.5).handle();
        let a = CollisionObject::new(sphere.clone());
        let b = CollisionObject::new(sphere.clone()).with_transform(at(3.0, 0.0, 0.0));

        match world.closest_points(&a, &b, 5.0) {
            ClosestPoints::WithinMargin(on_a, on_b) => {
                assert!((on_a - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-4);
                assert!((on_b - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-4);
            }
            other => panic!("expected closest points, got {:?}", other),
        }

        assert_eq!(world.closest_points(&a, &b, 1.0), ClosestPoints::Disjoint);

        let c = CollisionObject::new(sphere).with_transform(at(0.6, 0.0, 0.0));
        assert_eq!(world.closest_points(&a, &c, 5.0), ClosestPoints::Intersecting);
    }
}
