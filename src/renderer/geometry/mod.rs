//! Geometry abstractions
//!
//! Provides geometry types that can be drawn by materials.

mod bounds;
mod lines;
mod mesh;

pub use bounds::BoundingBoxMesh;
pub(crate) use bounds::BOX_EDGES;
pub use lines::Lines;
pub use mesh::Mesh;

use crate::core::buffer::{IndexBuffer, VertexBuffer};
use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An empty bounding box at the origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create a new bounding box from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a bounding box that contains all the given points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Get the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the bounding box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the eight corners of the bounding box.
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Check if a point is inside the bounding box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Merge with another bounding box.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Trait for drawable geometry.
pub trait Geometry {
    /// Get the vertex buffer.
    fn vertex_buffer(&self) -> &VertexBuffer;

    /// Get the index buffer, if indexed.
    fn index_buffer(&self) -> Option<&IndexBuffer>;

    /// Get the number of vertices or indices to draw.
    fn draw_count(&self) -> u32;

    /// Get the local-space bounding box.
    fn aabb(&self) -> Aabb;

    /// Record draw commands into the render pass.
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer().slice());
        if let Some(index_buffer) = self.index_buffer() {
            render_pass.set_index_buffer(index_buffer.slice(), index_buffer.format());
            render_pass.draw_indexed(0..self.draw_count(), 0, 0..1);
        } else {
            render_pass.draw(0..self.draw_count(), 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points_wraps_all_points() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 0.5));
    }

    #[test]
    fn aabb_center_and_size() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn aabb_contains_boundary_points() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::ONE));
        assert!(aabb.contains(Vec3::splat(0.5)));
        assert!(!aabb.contains(Vec3::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn aabb_merge_covers_both() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(2.0, 0.5, 1.0));
        let merged = a.merge(&b);
        assert_eq!(merged.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(merged.max, Vec3::new(2.0, 1.0, 1.0));
    }
}
