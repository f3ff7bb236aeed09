//! Collision shapes with Bullet-style margins.
//!
//! The margin is carved out of the stated extents and replaced by rounding,
//! so a shape's outer bounds are the same at every margin. Margin zero means
//! the exact sharp geometry; a positive margin trades sharp corners for
//! rounded ones, which is what the narrow phase prefers numerically.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use parry3d::shape::{Shape, SharedShape};

use crate::renderer::geometry::Aabb;

use super::object::Transform;
use super::{point_to_vec3, to_isometry};

/// Default collision margin for convex shapes, in world units.
pub const DEFAULT_MARGIN: f32 = 0.04;

/// Shared, immutable handle to a collision shape.
///
/// Objects hold their shape through this handle, so one shape can back any
/// number of objects without transferring ownership.
pub type ShapeHandle = Arc<CollisionShape>;

/// The geometry a [`CollisionShape`] was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Box centered on the origin, described by its half extents.
    Cuboid { half_extents: Vec3 },
    /// Sphere centered on the origin.
    Sphere { radius: f32 },
}

/// A convex collision shape usable in contact queries.
#[derive(Clone)]
pub struct CollisionShape {
    kind: ShapeKind,
    margin: f32,
    backend: SharedShape,
}

impl CollisionShape {
    /// Create a box shape with the given half extents and the default margin.
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::from_kind(ShapeKind::Cuboid { half_extents }, DEFAULT_MARGIN)
    }

    /// Create a sphere shape. Spheres are already smooth, so the margin has
    /// no effect on their geometry.
    pub fn sphere(radius: f32) -> Self {
        Self::from_kind(ShapeKind::Sphere { radius }, DEFAULT_MARGIN)
    }

    /// Replace the collision margin.
    ///
    /// A margin of zero disables rounding entirely and queries run against
    /// the exact geometry. Margins are clamped to the smallest half extent so
    /// the rounded core never inverts; at the clamp the core is flat along
    /// that axis but the outer bounds still hold.
    pub fn with_margin(self, margin: f32) -> Self {
        Self::from_kind(self.kind, margin)
    }

    fn from_kind(kind: ShapeKind, margin: f32) -> Self {
        let margin = clamp_margin(kind, margin);
        Self {
            kind,
            margin,
            backend: build_backend(kind, margin),
        }
    }

    /// The geometry this shape was built from.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The active collision margin.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Wrap the shape in a shared handle.
    pub fn handle(self) -> ShapeHandle {
        Arc::new(self)
    }

    /// Axis-aligned bounds of the shape in its local frame.
    pub fn local_aabb(&self) -> Aabb {
        let aabb = self.backend.compute_local_aabb();
        Aabb::new(point_to_vec3(aabb.mins), point_to_vec3(aabb.maxs))
    }

    /// Axis-aligned bounds of the shape under a world transform.
    pub fn compute_world_aabb(&self, transform: &Transform) -> Aabb {
        let aabb = self.backend.compute_aabb(&to_isometry(transform));
        Aabb::new(point_to_vec3(aabb.mins), point_to_vec3(aabb.maxs))
    }

    /// The parry shape queries dispatch on.
    pub(crate) fn backend(&self) -> &dyn Shape {
        &*self.backend
    }
}

impl fmt::Debug for CollisionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionShape")
            .field("kind", &self.kind)
            .field("margin", &self.margin)
            .finish()
    }
}

fn clamp_margin(kind: ShapeKind, margin: f32) -> f32 {
    let margin = margin.max(0.0);
    match kind {
        ShapeKind::Cuboid { half_extents } => margin.min(half_extents.min_element()),
        ShapeKind::Sphere { radius } => margin.min(radius),
    }
}

fn build_backend(kind: ShapeKind, margin: f32) -> SharedShape {
    match kind {
        ShapeKind::Cuboid { half_extents } => {
            if margin > 0.0 {
                let core = half_extents - Vec3::splat(margin);
                SharedShape::round_cuboid(core.x, core.y, core.z, margin)
            } else {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
        ShapeKind::Sphere { radius } => SharedShape::ball(radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_eq(a: Vec3, b: Vec3, context: &str) {
        assert!(
            (a - b).length() < 1e-5,
            "{}: expected {:?}, got {:?}",
            context,
            b,
            a
        );
    }

    #[test]
    fn test_margin_preserves_outer_bounds() {
        let half_extents = Vec3::new(1.0, 2.0, 3.0);
        let sharp = CollisionShape::cuboid(half_extents).with_margin(0.0);
        let rounded = CollisionShape::cuboid(half_extents).with_margin(0.04);

        let sharp_aabb = sharp.local_aabb();
        let rounded_aabb = rounded.local_aabb();

        assert_vec3_eq(sharp_aabb.min, -half_extents, "sharp min");
        assert_vec3_eq(sharp_aabb.max, half_extents, "sharp max");
        assert_vec3_eq(rounded_aabb.min, sharp_aabb.min, "rounded min");
        assert_vec3_eq(rounded_aabb.max, sharp_aabb.max, "rounded max");
    }

    #[test]
    fn test_margin_clamped_to_half_extents() {
        let shape = CollisionShape::cuboid(Vec3::splat(0.5)).with_margin(2.0);
        assert_eq!(shape.margin(), 0.5, "margin should clamp to the smallest half extent");

        // At the clamp the core is flat, but the outer bounds are intact.
        let aabb = shape.local_aabb();
        assert_vec3_eq(aabb.min, Vec3::splat(-0.5), "fully clamped min");
        assert_vec3_eq(aabb.max, Vec3::splat(0.5), "fully clamped max");

        let negative = CollisionShape::cuboid(Vec3::ONE).with_margin(-1.0);
        assert_eq!(negative.margin(), 0.0, "negative margins should clamp to zero");
    }

    #[test]
    fn test_sphere_ignores_margin() {
        let sphere = CollisionShape::sphere(0.75).with_margin(0.2);
        let aabb = sphere.local_aabb();
        assert_vec3_eq(aabb.min, Vec3::splat(-0.75), "sphere min");
        assert_vec3_eq(aabb.max, Vec3::splat(0.75), "sphere max");
    }

    #[test]
    fn test_world_aabb_follows_transform() {
        let shape = CollisionShape::cuboid(Vec3::ONE).with_margin(0.0);
        let transform = Transform::from_position(Vec3::new(0.0, 3.0, 0.0));
        let aabb = shape.compute_world_aabb(&transform);

        assert_vec3_eq(aabb.min, Vec3::new(-1.0, 2.0, -1.0), "world min");
        assert_vec3_eq(aabb.max, Vec3::new(1.0, 4.0, 1.0), "world max");
    }

    #[test]
    fn test_shared_handle() {
        let handle = CollisionShape::cuboid(Vec3::ONE).handle();
        let other = handle.clone();
        assert!(Arc::ptr_eq(&handle, &other), "clones should share the same shape");
    }
}
