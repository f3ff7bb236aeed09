//! Bounding box visualization
//!
//! Provides wireframe rendering of axis-aligned bounding boxes.

use super::{Aabb, Geometry};
use crate::context::GpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::core::vertex::VertexPC;
use glam::Vec3;

/// The 12 edges of a box, as index pairs into [`Aabb::corners`].
pub(crate) const BOX_EDGES: [(usize, usize); 12] = [
    // Near face (z = min)
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    // Far face (z = max)
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    // Connecting edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Wireframe bounding box mesh for visualization.
pub struct BoundingBoxMesh {
    vertex_buffer: VertexBuffer,
    aabb: Aabb,
}

impl BoundingBoxMesh {
    /// Create a wireframe bounding box from an AABB.
    pub fn new(ctx: &GpuContext, aabb: Aabb, color: [f32; 4]) -> Self {
        let vertices = Self::generate_vertices(&aabb, color);
        let vertex_buffer = VertexBuffer::new(ctx, &vertices, Some("bounding box"));

        Self {
            vertex_buffer,
            aabb,
        }
    }

    /// Create a wireframe bounding box from min/max points.
    pub fn from_min_max(ctx: &GpuContext, min: Vec3, max: Vec3, color: [f32; 4]) -> Self {
        Self::new(ctx, Aabb::new(min, max), color)
    }

    /// Create a wireframe unit cube centered at origin.
    pub fn unit_cube(ctx: &GpuContext, color: [f32; 4]) -> Self {
        Self::from_min_max(ctx, Vec3::splat(-0.5), Vec3::splat(0.5), color)
    }

    fn generate_vertices(aabb: &Aabb, color: [f32; 4]) -> Vec<VertexPC> {
        let corners = aabb.corners();

        let mut vertices = Vec::with_capacity(24);
        for (i, j) in BOX_EDGES {
            vertices.push(VertexPC::new(corners[i].to_array(), color));
            vertices.push(VertexPC::new(corners[j].to_array(), color));
        }
        vertices
    }
}

impl Geometry for BoundingBoxMesh {
    fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    fn index_buffer(&self) -> Option<&IndexBuffer> {
        None
    }

    fn draw_count(&self) -> u32 {
        24 // 12 edges * 2 vertices
    }

    fn aabb(&self) -> Aabb {
        self.aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_edges_touch_every_corner() {
        let mut seen = [0u32; 8];
        for (i, j) in BOX_EDGES {
            seen[i] += 1;
            seen[j] += 1;
        }
        // Each corner of a box joins exactly three edges.
        assert!(seen.iter().all(|&count| count == 3));
    }

    #[test]
    fn edges_have_unit_length_axes() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let corners = aabb.corners();
        for (i, j) in BOX_EDGES {
            let d = corners[i] - corners[j];
            // Corners on an edge differ along exactly one axis.
            let non_zero = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 1e-6).count();
            assert_eq!(non_zero, 1);
        }
    }
}
