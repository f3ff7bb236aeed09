//! Retained renderables: geometry paired with a material.

use crate::context::GpuContext;
use crate::renderer::geometry::Geometry;
use crate::renderer::material::Material;
use crate::renderer::viewer::Viewer;
use glam::Mat4;

/// Something the render loop can draw at a world placement.
pub trait Object {
    /// Record this object's draw commands into the pass.
    fn render(&self, ctx: &GpuContext, viewer: &dyn Viewer, render_pass: &mut wgpu::RenderPass<'_>);

    /// Current model matrix.
    fn transform(&self) -> Mat4;

    /// Move the object by replacing its model matrix.
    fn set_transform(&mut self, transform: Mat4);
}

/// A geometry drawn with a material.
///
/// The model matrix is pushed into the material's uniforms at render time,
/// so moving a `Gm` between frames is just a field write.
pub struct Gm<G: Geometry, M: Material> {
    geometry: G,
    material: M,
    transform: Mat4,
}

impl<G: Geometry, M: Material> Gm<G, M> {
    /// Pair a geometry with a material, placed at the identity transform.
    pub fn new(geometry: G, material: M) -> Self {
        Self {
            geometry,
            material,
            transform: Mat4::IDENTITY,
        }
    }
}

impl<G: Geometry, M: Material> Object for Gm<G, M> {
    fn render(
        &self,
        ctx: &GpuContext,
        viewer: &dyn Viewer,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        self.material.update_uniforms(ctx, viewer, self.transform);
        render_pass.set_pipeline(self.material.pipeline());
        render_pass.set_bind_group(0, self.material.camera_bind_group(), &[]);
        render_pass.set_bind_group(1, self.material.model_bind_group(), &[]);
        self.geometry.draw(render_pass);
    }

    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::{IndexBuffer, VertexBuffer};
    use crate::renderer::geometry::Aabb;
    use glam::Vec3;

    struct NullGeometry;

    impl Geometry for NullGeometry {
        fn vertex_buffer(&self) -> &VertexBuffer {
            unreachable!("not drawn in these tests")
        }

        fn index_buffer(&self) -> Option<&IndexBuffer> {
            None
        }

        fn draw_count(&self) -> u32 {
            0
        }

        fn aabb(&self) -> Aabb {
            Aabb::ZERO
        }
    }

    struct NullMaterial;

    impl Material for NullMaterial {
        fn pipeline(&self) -> &wgpu::RenderPipeline {
            unreachable!("not drawn in these tests")
        }

        fn camera_bind_group(&self) -> &wgpu::BindGroup {
            unreachable!("not drawn in these tests")
        }

        fn model_bind_group(&self) -> &wgpu::BindGroup {
            unreachable!("not drawn in these tests")
        }

        fn update_uniforms(&self, _ctx: &GpuContext, _viewer: &dyn Viewer, _model: Mat4) {}
    }

    #[test]
    fn gm_starts_at_the_identity() {
        let gm = Gm::new(NullGeometry, NullMaterial);
        assert_eq!(gm.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn set_transform_moves_the_object() {
        let mut gm = Gm::new(NullGeometry, NullMaterial);
        let placed = Mat4::from_translation(Vec3::new(0.0, 4.248, 0.0));

        let object: &mut dyn Object = &mut gm;
        object.set_transform(placed);
        assert_eq!(object.transform(), placed);
    }
}
