//! Collision objects: a shared shape plus a world transform.

use glam::{Mat4, Quat, Vec3};

use crate::renderer::geometry::Aabb;

use super::shape::ShapeHandle;

/// Rigid world placement. Stores position and rotation separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Apply a world-frame rotation delta, keeping the position unchanged.
    ///
    /// The resulting rotation is renormalized so repeated per-frame deltas do
    /// not drift away from unit length.
    pub fn rotated_by(self, delta: Quat) -> Self {
        Self {
            position: self.position,
            rotation: (delta * self.rotation).normalize(),
        }
    }

    /// Convert to a 4x4 matrix (translation * rotation).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Transform a point from local space into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An object that can take part in contact queries.
///
/// The shape handle is fixed for the object's lifetime; the transform is
/// meant to be updated every frame. Objects are either registered with a
/// [`CollisionWorld`](super::CollisionWorld) or kept by the caller and passed
/// to queries as a probe.
#[derive(Debug, Clone)]
pub struct CollisionObject {
    shape: ShapeHandle,
    transform: Transform,
    user_index: i32,
}

impl CollisionObject {
    /// Create an object at the identity transform.
    pub fn new(shape: ShapeHandle) -> Self {
        Self {
            shape,
            transform: Transform::IDENTITY,
            user_index: 0,
        }
    }

    /// Set the initial world transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Tag the object with a caller-defined index.
    pub fn with_user_index(mut self, user_index: i32) -> Self {
        self.user_index = user_index;
        self
    }

    pub fn shape(&self) -> &ShapeHandle {
        &self.shape
    }

    pub fn world_transform(&self) -> Transform {
        self.transform
    }

    pub fn set_world_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn user_index(&self) -> i32 {
        self.user_index
    }

    pub fn set_user_index(&mut self, user_index: i32) {
        self.user_index = user_index;
    }

    /// World-space axis-aligned bounds at the current transform.
    pub fn world_aabb(&self) -> Aabb {
        self.shape.compute_world_aabb(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionShape;

    #[test]
    fn test_transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_identity_delta_leaves_transform_unchanged() {
        let t = Transform::from_position(Vec3::new(0.0, 3.0, 0.0));
        let rotated = t.rotated_by(Quat::IDENTITY);
        assert_eq!(rotated, t, "a zero rotation delta must be an identity update");

        let tilted = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_xyzw(0.739, -0.204, 0.587, 0.257).normalize(),
        );
        let still = tilted.rotated_by(Quat::IDENTITY);
        assert_eq!(still.position, tilted.position);
        assert!(
            still.rotation.dot(tilted.rotation).abs() > 1.0 - 1e-6,
            "rotation should stay in place up to renormalization"
        );
    }

    #[test]
    fn test_rotated_by_preserves_position() {
        let t = Transform::from_position(Vec3::new(0.0, 3.0, 0.0));
        let rotated = t.rotated_by(Quat::from_rotation_y(0.5));
        assert_eq!(rotated.position, t.position);
        assert!((rotated.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let t = Transform::new(Vec3::new(1.0, -1.0, 2.0), Quat::from_rotation_z(0.8));
        let p = Vec3::new(0.3, 0.7, -0.2);
        let via_matrix = t.to_matrix().transform_point3(p);
        assert!((t.transform_point(p) - via_matrix).length() < 1e-6);
    }

    #[test]
    fn test_object_world_aabb() {
        let shape = CollisionShape::cuboid(Vec3::ONE).with_margin(0.0).handle();
        let object = CollisionObject::new(shape)
            .with_transform(Transform::from_position(Vec3::new(0.0, 3.0, 0.0)));

        let aabb = object.world_aabb();
        assert!((aabb.min - Vec3::new(-1.0, 2.0, -1.0)).length() < 1e-5);
        assert!((aabb.max - Vec3::new(1.0, 4.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_objects_share_one_shape() {
        let shape = CollisionShape::sphere(0.5).handle();
        let a = CollisionObject::new(shape.clone());
        let b = CollisionObject::new(shape);
        assert!(
            std::sync::Arc::ptr_eq(a.shape(), b.shape()),
            "both objects should reference the same shape"
        );
    }
}
