//! Sun–Earth–Moon hierarchy built with a matrix stack.
//!
//! The scene is rebuilt every frame. Frames nest like this:
//!
//! ```text
//! view (camera distance, theta, phi)
//! ├── sun      spin, poles up, radius
//! └── earth orbit (rotation + radius)
//!     ├── earth spin, poles up, radius
//!     └── moon orbit → moon spin, poles up, radius
//! ```
//!
//! Spin and size of a body live inside a push/pop pair so its children only
//! inherit the orbit.

use std::f32::consts::FRAC_PI_2;

use orrery_transform::{Matrix4, MatrixStack};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Body {
    Sun,
    Earth,
    Moon,
}

impl Body {
    /// Linear RGB tint used in place of a texture.
    pub fn color(self) -> [f32; 3] {
        match self {
            Body::Sun => [1.0, 0.72, 0.2],
            Body::Earth => [0.15, 0.35, 0.9],
            Body::Moon => [0.6, 0.6, 0.58],
        }
    }

    /// The sun lights itself; the others are lit by it.
    pub fn emissive(self) -> f32 {
        match self {
            Body::Sun => 1.0,
            Body::Earth | Body::Moon => 0.0,
        }
    }
}

/// Orbit radii, angular speeds (rad/s) and body radii.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarConfig {
    pub camera_distance: f32,

    pub sun_spin: f32,
    pub sun_radius: f32,

    pub earth_orbit_speed: f32,
    pub earth_orbit_radius: f32,
    pub earth_spin: f32,
    pub earth_radius: f32,

    pub moon_orbit_speed: f32,
    pub moon_orbit_radius: f32,
    /// Zero keeps the same side of the moon facing the earth.
    pub moon_spin: f32,
    pub moon_radius: f32,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            camera_distance: 5.0,

            sun_spin: 1.0,
            sun_radius: 0.5,

            earth_orbit_speed: 0.2,
            earth_orbit_radius: 1.5,
            earth_spin: 10.0,
            earth_radius: 0.2,

            moon_orbit_speed: 2.0,
            moon_orbit_radius: 0.5,
            moon_spin: 0.0,
            moon_radius: 0.1,
        }
    }
}

/// One body ready to draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyDraw {
    pub body: Body,
    pub model_view: Matrix4,
}

/// Result of building one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarFrame {
    pub bodies: Vec<BodyDraw>,
    /// Sun centre in view space; the light source for the other bodies.
    pub light_pos: [f32; 3],
    /// The stack as it stood in the moon's frame, when a dump was requested.
    pub stack_dump: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    pub config: SolarConfig,
}

impl SolarSystem {
    pub fn new(config: SolarConfig) -> Self {
        Self { config }
    }

    /// Builds the scene at time `t` (seconds) seen from orbit angles `phi`
    /// (yaw) and `theta` (pitch).
    ///
    /// Every push is matched by a pop, so the stack leaves exactly as it came in.
    /// With `dump` set, the stack is logged from the moon's frame, the deepest
    /// point of the hierarchy.
    pub fn draw(
        &self,
        stack: &mut MatrixStack,
        t: f64,
        phi: f64,
        theta: f64,
        dump: bool,
    ) -> SolarFrame {
        let c = &self.config;
        let t = t as f32;
        let mut bodies = Vec::with_capacity(3);

        stack.push();

        // View transform ("camera motion").
        stack.translate(0.0, 0.0, -c.camera_distance);
        stack.rot_x(theta);
        stack.rot_y(phi);

        let view = stack.current_matrix();
        let light_pos = [view[12], view[13], view[14]];

        // Sun
        stack.push();
        stack.rot_y(c.sun_spin * t);
        stack.rot_x(-FRAC_PI_2);
        stack.scale(c.sun_radius);
        emit(stack, Body::Sun, &mut bodies);
        stack.pop();

        // Earth orbit frame, shared by the earth and the moon.
        stack.rot_y(c.earth_orbit_speed * t);
        stack.translate(c.earth_orbit_radius, 0.0, 0.0);

        stack.push();
        stack.rot_y(c.earth_spin * t);
        stack.rot_x(-FRAC_PI_2);
        stack.scale(c.earth_radius);
        emit(stack, Body::Earth, &mut bodies);
        stack.pop();

        // Moon
        stack.rot_y(c.moon_orbit_speed * t);
        stack.translate(c.moon_orbit_radius, 0.0, 0.0);
        stack.rot_y(c.moon_spin * t);
        stack.rot_x(-FRAC_PI_2);
        stack.scale(c.moon_radius);
        emit(stack, Body::Moon, &mut bodies);

        let stack_dump = dump.then(|| {
            stack.print();
            stack.to_string()
        });

        stack.pop();

        SolarFrame {
            bodies,
            light_pos,
            stack_dump,
        }
    }
}

fn emit(stack: &MatrixStack, body: Body, out: &mut Vec<BodyDraw>) {
    out.push(BodyDraw {
        body,
        model_view: *stack.current_matrix(),
    });
}
