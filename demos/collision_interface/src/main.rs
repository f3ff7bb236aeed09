//! Contact-test demo: a box is spun against a registered box and every
//! contact point found by the query is drawn as a line between the two
//! surface points. The probe box is never registered with the world, so the
//! query sees exactly one candidate body.

mod scene;

use glam::Vec3;
use graze::{
    screen_target, Camera, ClearState, ColorMaterial, DebugDraw, Event, FrameInput, FrameOutput,
    Gm, GpuContext, Key, Mesh, Object, OrbitControl, Window, WindowSettings,
};

use crate::scene::Scene;

const CAMERA_EYE: Vec3 = Vec3::new(6.0, 4.0, 1.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
const BACKGROUND: [f32; 4] = [0.08, 0.08, 0.11, 1.0];
const BODY_COLOR: [f32; 3] = [0.8, 0.3, 0.2];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let window = Window::new(
        WindowSettings::default()
            .title("Collision Interface Demo")
            .size(1024, 768),
    )?;

    window.render_loop(Demo::new(), Demo::frame)
}

struct Demo {
    scene: Scene,
    view: Option<View>,
}

impl Demo {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            view: None,
        }
    }

    fn frame(&mut self, mut input: FrameInput<'_>) -> FrameOutput {
        let view = self.view.get_or_insert_with(|| {
            View::new(input.ctx, input.surface_format).expect("Failed to create demo view")
        });

        view.camera.set_viewport(input.viewport);
        view.control.handle_events(&mut view.camera, &mut input.events);

        let mut exit = false;
        for event in &input.events {
            if let Event::KeyPress {
                key: Key::Escape, ..
            } = event
            {
                exit = true;
            }
        }

        let contacts = self.scene.step(input.delta_time as f32);
        log::trace!("{} contact points this frame", contacts);

        view.body.set_transform(self.scene.body_matrix());

        let target = screen_target(&input);
        let mut encoder = input.ctx.create_encoder(Some("demo frame"));
        {
            let mut pass = target
                .begin_render_pass(&mut encoder, ClearState::color_and_depth(BACKGROUND, 1.0));
            view.body.render(input.ctx, &view.camera, &mut pass);
            view.lines.render(input.ctx, &view.camera, self.scene.batch(), &mut pass);
        }
        input.ctx.submit([encoder.finish()]);

        if exit {
            FrameOutput::exit()
        } else {
            FrameOutput::new()
        }
    }
}

/// GPU resources, created on the first frame once the surface format is known.
struct View {
    camera: Camera,
    control: OrbitControl,
    body: Gm<Mesh, ColorMaterial>,
    lines: DebugDraw,
}

impl View {
    fn new(ctx: &GpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let camera =
            Camera::new_perspective(CAMERA_EYE, CAMERA_TARGET, Vec3::Y, 45.0, 1.0, 0.1, 100.0);
        let control = OrbitControl::new(CAMERA_TARGET, 1.0, 30.0);

        let body = Gm::new(
            Mesh::cuboid(ctx, scene::BODY_HALF_EXTENTS, BODY_COLOR),
            ColorMaterial::new(ctx, format)?,
        );
        let lines = DebugDraw::new(ctx, format)?;

        Ok(Self {
            camera,
            control,
            body,
            lines,
        })
    }
}
