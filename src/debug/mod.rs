//! Debug line drawing
//!
//! Collects colored line segments on the CPU and renders them in one
//! draw call. Contact callbacks and scene code push into a [`LineBatch`];
//! the window loop hands the batch to a [`DebugDraw`] once per frame.

use crate::context::GpuContext;
use crate::core::render_states::{BlendState, DepthState};
use crate::core::vertex::VertexPC;
use crate::renderer::geometry::{Aabb, Geometry, Lines, BOX_EDGES};
use crate::renderer::material::{LineMaterial, Material};
use crate::renderer::viewer::Viewer;
use glam::{Mat4, Vec3};

/// A batch of colored line segments in world space.
///
/// Cleared and refilled every frame. All positions are world space, so
/// the batch renders with an identity model matrix.
#[derive(Debug, Default)]
pub struct LineBatch {
    vertices: Vec<VertexPC>,
}

impl LineBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single line segment.
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.vertices.push(VertexPC::new(from.to_array(), color));
        self.vertices.push(VertexPC::new(to.to_array(), color));
    }

    /// Add the twelve edges of a box, transformed into world space.
    pub fn draw_box(&mut self, min: Vec3, max: Vec3, transform: Mat4, color: [f32; 4]) {
        let corners = Aabb::new(min, max)
            .corners()
            .map(|corner| transform.transform_point3(corner));
        for (i, j) in BOX_EDGES {
            self.draw_line(corners[i], corners[j], color);
        }
    }

    /// Add RGB axis lines for a transform.
    pub fn draw_axes(&mut self, transform: Mat4, size: f32) {
        let origin = transform.transform_point3(Vec3::ZERO);
        let x = transform.transform_point3(Vec3::X * size);
        let y = transform.transform_point3(Vec3::Y * size);
        let z = transform.transform_point3(Vec3::Z * size);
        self.draw_line(origin, x, [1.0, 0.0, 0.0, 1.0]);
        self.draw_line(origin, y, [0.0, 1.0, 0.0, 1.0]);
        self.draw_line(origin, z, [0.0, 0.0, 1.0, 1.0]);
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Check whether the batch holds no segments.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the number of line segments.
    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Get the accumulated vertices.
    pub fn vertices(&self) -> &[VertexPC] {
        &self.vertices
    }
}

/// Renders a [`LineBatch`] with a line material.
pub struct DebugDraw {
    material: LineMaterial,
}

impl DebugDraw {
    /// Create a debug drawer with depth testing.
    pub fn new(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let material = LineMaterial::with_options(
            ctx,
            format,
            BlendState::Alpha,
            DepthState::read_only(),
        )?;
        Ok(Self { material })
    }

    /// Create a debug drawer that draws over everything.
    pub fn no_depth(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let material = LineMaterial::no_depth(ctx, format)?;
        Ok(Self { material })
    }

    /// Render the batch. Does nothing for an empty batch.
    pub fn render(
        &self,
        ctx: &GpuContext,
        viewer: &dyn Viewer,
        batch: &LineBatch,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        if batch.is_empty() {
            return;
        }

        // The vertex data changes every frame, so the buffer is rebuilt
        // rather than kept resident.
        let lines = Lines::new(ctx, batch.vertices());

        self.material.update_uniforms(ctx, viewer, Mat4::IDENTITY);
        render_pass.set_pipeline(self.material.pipeline());
        render_pass.set_bind_group(0, self.material.camera_bind_group(), &[]);
        render_pass.set_bind_group(1, self.material.model_bind_group(), &[]);
        lines.draw(render_pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_line_appends_two_vertices() {
        let mut batch = LineBatch::new();
        batch.draw_line(Vec3::ZERO, Vec3::X, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(batch.line_count(), 1);
        assert_eq!(batch.vertices().len(), 2);
        assert_eq!(batch.vertices()[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn draw_box_emits_twelve_edges() {
        let mut batch = LineBatch::new();
        batch.draw_box(
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
            Mat4::IDENTITY,
            [1.0, 1.0, 1.0, 1.0],
        );
        assert_eq!(batch.line_count(), 12);
    }

    #[test]
    fn draw_box_applies_the_transform() {
        let mut batch = LineBatch::new();
        let transform = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
        batch.draw_box(
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
            transform,
            [1.0, 1.0, 1.0, 1.0],
        );
        for v in batch.vertices() {
            assert!(v.position[1] >= 2.0 && v.position[1] <= 4.0);
        }
    }

    #[test]
    fn draw_axes_uses_rgb_colors() {
        let mut batch = LineBatch::new();
        batch.draw_axes(Mat4::IDENTITY, 2.0);
        assert_eq!(batch.line_count(), 3);
        let vertices = batch.vertices();
        assert_eq!(vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertices[2].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(vertices[4].color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(vertices[3].position, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_empties_the_batch() {
        let mut batch = LineBatch::new();
        batch.draw_line(Vec3::ZERO, Vec3::Y, [1.0, 1.0, 1.0, 1.0]);
        assert!(!batch.is_empty());
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.line_count(), 0);
    }
}
