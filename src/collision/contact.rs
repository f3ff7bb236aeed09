//! Contact point data and the per-point result callback.

use glam::Vec3;

use super::object::CollisionObject;

/// One contact location between two queried shapes.
///
/// Points are produced transiently during a contact test and passed to the
/// callback by reference; they are not retained by the world afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManifoldPoint {
    /// World-space contact position on the surface of the first shape.
    pub position_world_on_a: Vec3,
    /// World-space contact position on the surface of the second shape.
    pub position_world_on_b: Vec3,
    /// World-space contact normal on the second shape, pointing towards the
    /// first shape.
    pub normal_world_on_b: Vec3,
    /// Signed separation distance. Negative when the shapes interpenetrate.
    pub distance: f32,
    /// Sub-shape index on the first side. Zero for simple convex shapes.
    pub part_id_a: u32,
    /// Sub-shape index on the second side. Zero for simple convex shapes.
    pub part_id_b: u32,
}

impl ManifoldPoint {
    /// Midpoint between the two surface positions.
    pub fn midpoint(&self) -> Vec3 {
        (self.position_world_on_a + self.position_world_on_b) * 0.5
    }

    /// Whether the shapes interpenetrate at this point.
    pub fn is_penetrating(&self) -> bool {
        self.distance < 0.0
    }
}

/// Receiver for the results of a contact test.
///
/// [`add_single_result`](Self::add_single_result) is invoked once per
/// discovered manifold point, re-entrantly from inside the query. The
/// returned score historically scaled the contact's influence; the world
/// ignores it, and `0.0` means "accept as-is". Implementations must not
/// fail: there is no error channel out of the collision loop, so local
/// problems should degrade to a no-op.
pub trait ContactResultCallback {
    /// Pair filter consulted before any narrow-phase work on `body`.
    /// Defaults to accepting every registered object.
    fn needs_collision(&self, _body: &CollisionObject) -> bool {
        true
    }

    /// Called once per contact point. `point` is only valid for the duration
    /// of this call.
    fn add_single_result(&mut self, point: &ManifoldPoint) -> f32;
}
