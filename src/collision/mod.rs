//! Contact queries between collision objects, backed by the `parry3d`
//! narrow-phase.
//!
//! # Architecture
//!
//! A contact test runs in three stages:
//!
//! 1. Filter registered objects through the callback's pair filter
//! 2. Coarse world-AABB cull between the probe and each candidate
//! 3. Narrow-phase manifold generation between the surviving pairs,
//!    invoking the callback once per accepted manifold point
//!
//! The narrow phase itself is delegated to parry's query dispatcher; this
//! module only converts transforms and manifold points across the `glam` /
//! `nalgebra` boundary. Manifold points are borrowed for the duration of a
//! single callback invocation and never stored.
//!
//! # Example
//!
//! ```no_run
//! use graze::collision::{
//!     CollisionConfig, CollisionObject, CollisionShape, CollisionWorld,
//!     ContactResultCallback, ManifoldPoint, Transform,
//! };
//! use glam::Vec3;
//!
//! struct CountContacts(usize);
//!
//! impl ContactResultCallback for CountContacts {
//!     fn add_single_result(&mut self, _point: &ManifoldPoint) -> f32 {
//!         self.0 += 1;
//!         0.0
//!     }
//! }
//!
//! let mut world = CollisionWorld::new(CollisionConfig::default());
//! let shape = CollisionShape::cuboid(Vec3::splat(0.5)).with_margin(0.0).handle();
//!
//! world.add_object(
//!     CollisionObject::new(shape.clone())
//!         .with_transform(Transform::from_position(Vec3::new(0.0, 4.0, 0.0))),
//! );
//!
//! let probe = CollisionObject::new(shape)
//!     .with_transform(Transform::from_position(Vec3::new(0.0, 4.2, 0.0)));
//!
//! let mut counter = CountContacts(0);
//! world.contact_test(&probe, &mut counter);
//! ```

pub mod contact;
pub mod object;
pub mod shape;
pub mod world;

pub use contact::{ContactResultCallback, ManifoldPoint};
pub use object::{CollisionObject, Transform};
pub use shape::{CollisionShape, ShapeHandle, ShapeKind, DEFAULT_MARGIN};
pub use world::{ClosestPoints, CollisionConfig, CollisionObjectHandle, CollisionWorld};

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::na::{Quaternion, Translation3, UnitQuaternion};

/// Convert a world transform into the isometry type parry queries take.
pub(crate) fn to_isometry(transform: &Transform) -> Isometry<Real> {
    let p = transform.position;
    let q = transform.rotation;
    Isometry::from_parts(
        Translation3::new(p.x, p.y, p.z),
        UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

pub(crate) fn point_to_vec3(point: Point<Real>) -> Vec3 {
    Vec3::new(point.x, point.y, point.z)
}

pub(crate) fn vector_to_vec3(vector: Vector<Real>) -> Vec3 {
    Vec3::new(vector.x, vector.y, vector.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_isometry_roundtrip() {
        let transform = Transform {
            position: Vec3::new(1.0, -2.0, 3.0),
            rotation: Quat::from_rotation_y(0.7),
        };

        let iso = to_isometry(&transform);
        let local = Point::new(0.5, 0.25, -0.75);
        let via_parry = point_to_vec3(iso * local);
        let via_glam = transform.transform_point(Vec3::new(0.5, 0.25, -0.75));

        assert!(
            (via_parry - via_glam).length() < 1e-5,
            "isometry conversion should match the glam transform, got {:?} vs {:?}",
            via_parry,
            via_glam
        );
    }

    #[test]
    fn test_identity_isometry() {
        let iso = to_isometry(&Transform::IDENTITY);
        assert_eq!(point_to_vec3(iso * Point::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }
}
