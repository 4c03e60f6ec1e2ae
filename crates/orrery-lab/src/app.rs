use orrery_engine::camera::{KeyRotator, MouseRotator, Projection, RotatorConfig};
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::input::Key;
use orrery_engine::render::{SphereInstance, SphereRenderer};
use orrery_transform::MatrixStack;

use crate::solar::{SolarConfig, SolarFrame, SolarSystem};

pub const TITLE: &str = "Orrery: Hierarchical Transformations";

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Sphere tessellation (slices around the equator).
const SPHERE_SEGMENTS: u32 = 30;

/// Controls:
/// - left drag / arrow keys: orbit the camera
/// - Space: pause or resume the animation
/// - R: reset the camera
/// - P: log the matrix stack
pub struct LabApp {
    stack: MatrixStack,
    system: SolarSystem,
    projection: Projection,

    rotator_config: RotatorConfig,
    mouse: MouseRotator,
    keys: KeyRotator,

    renderer: SphereRenderer,

    /// Animation time; only advances while not paused.
    sim_time: f64,
    paused: bool,
}

impl LabApp {
    pub fn new(config: SolarConfig, rotator_config: RotatorConfig) -> Self {
        let mut stack = MatrixStack::new();
        stack.init();

        Self {
            stack,
            system: SolarSystem::new(config),
            projection: Projection::default(),
            rotator_config,
            mouse: MouseRotator::new(rotator_config),
            keys: KeyRotator::new(rotator_config),
            renderer: SphereRenderer::new(SPHERE_SEGMENTS),
            sim_time: 0.0,
            paused: false,
        }
    }

    /// Combined orbit angles of both rotators.
    fn camera_angles(&self) -> (f64, f64) {
        let phi = self.mouse.phi + self.keys.phi;
        let theta = (self.mouse.theta + self.keys.theta)
            .clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        (phi, theta)
    }

    /// Advances animation time by `dt` unless paused.
    fn advance(&mut self, dt: f64) {
        if !self.paused {
            self.sim_time += dt;
        }
    }

    fn build_frame(&mut self, dump: bool) -> SolarFrame {
        self.stack.debug_assert_balanced();
        let (phi, theta) = self.camera_angles();
        self.system.draw(&mut self.stack, self.sim_time, phi, theta, dump)
    }
}

impl App for LabApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(sample) = ctx.fps {
            ctx.window.set_title(&sample.title(TITLE));
        }

        // ── input ─────────────────────────────────────────────────────────
        if ctx.input_frame.key_pressed(Key::Space) {
            self.paused = !self.paused;
            log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
        }
        if ctx.input_frame.key_pressed(Key::R) {
            self.mouse = MouseRotator::new(self.rotator_config);
            self.keys = KeyRotator::new(self.rotator_config);
        }

        self.mouse.poll(ctx.input, ctx.window.logical_size());
        self.keys.poll(ctx.input, f64::from(ctx.time.dt));
        self.advance(f64::from(ctx.time.dt));

        // ── scene ─────────────────────────────────────────────────────────
        let dump = ctx.input_frame.key_pressed(Key::P);
        if dump {
            let (index, t) = (ctx.time.frame_index, self.sim_time);
            log::info!("matrix stack at frame {index}, t = {t:.2} s");
        }
        let frame = self.build_frame(dump);

        let instances: Vec<SphereInstance> = frame
            .bodies
            .iter()
            .map(|b| SphereInstance {
                model_view: b.model_view,
                color: b.body.color(),
                emissive: b.body.emissive(),
            })
            .collect();

        let size = ctx.gpu.size();
        let projection = self.projection.matrix(size.width, size.height);

        // ── render ────────────────────────────────────────────────────────
        let renderer = &mut self.renderer;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, &projection, frame.light_pos, &instances);
        })
    }
}
