//! Mesh geometry
//!
//! Provides indexed triangle meshes and primitive generators.

use super::{Aabb, Geometry};
use crate::context::GpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::core::vertex::Vertex;
use glam::Vec3;

/// A mesh with vertex and index data.
pub struct Mesh {
    vertex_buffer: VertexBuffer,
    index_buffer: Option<IndexBuffer>,
    draw_count: u32,
    aabb: Aabb,
}

impl Mesh {
    /// Create a new mesh from vertices and indices.
    pub fn new(
        ctx: &GpuContext,
        vertices: &[Vertex],
        indices: Option<&[u32]>,
        label: Option<&str>,
    ) -> Self {
        let vertex_buffer = VertexBuffer::new(ctx, vertices, label);

        let (index_buffer, draw_count) = if let Some(indices) = indices {
            let ib = IndexBuffer::new_u32(ctx, indices, label);
            (Some(ib), indices.len() as u32)
        } else {
            (None, vertices.len() as u32)
        };

        let aabb = Aabb::from_points(vertices.iter().map(|v| Vec3::from(v.position)));

        Self {
            vertex_buffer,
            index_buffer,
            draw_count,
            aabb,
        }
    }

    /// Create an axis-aligned box mesh from half extents.
    pub fn cuboid(ctx: &GpuContext, half_extents: Vec3, color: [f32; 3]) -> Self {
        let vertices = cuboid_vertices(half_extents, color);
        let indices = cuboid_indices();
        Self::new(ctx, &vertices, Some(&indices), Some("cuboid"))
    }

    /// Create a cube mesh with the given edge length.
    pub fn cube(ctx: &GpuContext, size: f32, color: [f32; 3]) -> Self {
        Self::cuboid(ctx, Vec3::splat(size / 2.0), color)
    }

    /// Create a UV sphere mesh.
    pub fn sphere(ctx: &GpuContext, radius: f32, segments: u32, rings: u32, color: [f32; 3]) -> Self {
        let (vertices, indices) = sphere_vertices(radius, segments, rings, color);
        Self::new(ctx, &vertices, Some(&indices), Some("sphere"))
    }
}

impl Geometry for Mesh {
    fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }

    fn draw_count(&self) -> u32 {
        self.draw_count
    }

    fn aabb(&self) -> Aabb {
        self.aabb
    }
}

// Helper functions for generating primitive geometry

fn cuboid_vertices(he: Vec3, color: [f32; 3]) -> Vec<Vertex> {
    // Each face gets its own four vertices so normals stay flat.
    // Corners are listed counter-clockwise seen from outside.
    let faces: [([f32; 3], [Vec3; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                Vec3::new(-he.x, -he.y, he.z),
                Vec3::new(he.x, -he.y, he.z),
                Vec3::new(he.x, he.y, he.z),
                Vec3::new(-he.x, he.y, he.z),
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                Vec3::new(he.x, -he.y, -he.z),
                Vec3::new(-he.x, -he.y, -he.z),
                Vec3::new(-he.x, he.y, -he.z),
                Vec3::new(he.x, he.y, -he.z),
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                Vec3::new(-he.x, he.y, he.z),
                Vec3::new(he.x, he.y, he.z),
                Vec3::new(he.x, he.y, -he.z),
                Vec3::new(-he.x, he.y, -he.z),
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                Vec3::new(-he.x, -he.y, -he.z),
                Vec3::new(he.x, -he.y, -he.z),
                Vec3::new(he.x, -he.y, he.z),
                Vec3::new(-he.x, -he.y, he.z),
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                Vec3::new(he.x, -he.y, he.z),
                Vec3::new(he.x, -he.y, -he.z),
                Vec3::new(he.x, he.y, -he.z),
                Vec3::new(he.x, he.y, he.z),
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                Vec3::new(-he.x, -he.y, -he.z),
                Vec3::new(-he.x, -he.y, he.z),
                Vec3::new(-he.x, he.y, he.z),
                Vec3::new(-he.x, he.y, -he.z),
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    for (normal, corners) in faces {
        for corner in corners {
            vertices.push(Vertex {
                position: corner.to_array(),
                normal,
                color,
            });
        }
    }
    vertices
}

fn cuboid_indices() -> Vec<u32> {
    let mut indices = Vec::with_capacity(36);
    for face in 0..6 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    indices
}

fn sphere_vertices(
    radius: f32,
    segments: u32,
    rings: u32,
    color: [f32; 3],
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for segment in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            vertices.push(Vertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
                color,
            });
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_four_vertices_per_face() {
        let vertices = cuboid_vertices(Vec3::new(1.0, 0.5, 2.0), [1.0, 0.0, 0.0]);
        assert_eq!(vertices.len(), 24);

        let indices = cuboid_indices();
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| i < 24));
    }

    #[test]
    fn cuboid_vertices_stay_on_half_extents() {
        let he = Vec3::new(1.0, 0.5, 2.0);
        for v in cuboid_vertices(he, [1.0, 1.0, 1.0]) {
            assert_eq!(v.position[0].abs(), he.x);
            assert_eq!(v.position[1].abs(), he.y);
            assert_eq!(v.position[2].abs(), he.z);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let (vertices, indices) = sphere_vertices(2.0, 8, 6, [1.0, 1.0, 1.0]);
        for v in &vertices {
            let len = Vec3::from(v.position).length();
            assert!(
                (len - 2.0).abs() < 1e-4,
                "vertex at distance {} from center",
                len
            );
        }
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
