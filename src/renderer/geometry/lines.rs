//! Line list geometry
//!
//! A vertex-colored line list, drawn with [`LineMaterial`](crate::renderer::material::LineMaterial).

use super::{Aabb, Geometry};
use crate::context::GpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::core::vertex::VertexPC;
use glam::Vec3;

/// A set of line segments with per-vertex colors.
///
/// Every pair of vertices forms one segment.
pub struct Lines {
    vertex_buffer: VertexBuffer,
    vertex_count: u32,
    aabb: Aabb,
}

impl Lines {
    /// Create line geometry from pre-built vertices.
    pub fn new(ctx: &GpuContext, vertices: &[VertexPC]) -> Self {
        let vertex_buffer = VertexBuffer::new(ctx, vertices, Some("lines"));
        let aabb = if vertices.is_empty() {
            Aabb::ZERO
        } else {
            Aabb::from_points(vertices.iter().map(|v| Vec3::from(v.position)))
        };

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            aabb,
        }
    }

    /// Create line geometry from segments sharing a single color.
    pub fn with_color(ctx: &GpuContext, segments: &[(Vec3, Vec3)], color: [f32; 4]) -> Self {
        let vertices: Vec<VertexPC> = segments
            .iter()
            .flat_map(|(start, end)| {
                [
                    VertexPC::new(start.to_array(), color),
                    VertexPC::new(end.to_array(), color),
                ]
            })
            .collect();
        Self::new(ctx, &vertices)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Geometry for Lines {
    fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    fn index_buffer(&self) -> Option<&IndexBuffer> {
        None
    }

    fn draw_count(&self) -> u32 {
        self.vertex_count
    }

    fn aabb(&self) -> Aabb {
        self.aabb
    }
}
