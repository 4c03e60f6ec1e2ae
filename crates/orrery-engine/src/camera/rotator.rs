use std::f64::consts::{FRAC_PI_2, TAU};

use crate::input::{InputState, Key, MouseButton};

/// Rotator tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotatorConfig {
    /// Angle swept by dragging across the whole window, in radians.
    pub drag_fov: f64,
    /// Arrow-key rotation speed in radians per second.
    pub key_speed: f64,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            drag_fov: FRAC_PI_2,
            key_speed: FRAC_PI_2,
        }
    }
}

/// Wraps `phi` into `[0, 2π)`.
fn wrap_phi(phi: f64) -> f64 {
    let wrapped = phi % TAU;
    if wrapped < 0.0 { wrapped + TAU } else { wrapped }
}

fn clamp_theta(theta: f64) -> f64 {
    theta.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Orbit angles driven by left-button mouse drags.
///
/// `phi` (yaw) wraps around; `theta` (pitch) is clamped to ±90°. A drag only
/// counts when the button was held on both the previous and the current poll,
/// so pressing the button never produces a jump.
#[derive(Debug, Clone, Default)]
pub struct MouseRotator {
    pub phi: f64,
    pub theta: f64,

    config: RotatorConfig,
    last_pos: Option<(f32, f32)>,
    last_left: bool,
}

impl MouseRotator {
    pub fn new(config: RotatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Samples the pointer once per frame. `size` is the window's logical size.
    pub fn poll(&mut self, input: &InputState, size: (f32, f32)) {
        let left = input.button_down(MouseButton::Left);
        let pos = input.pointer_pos;

        let dragging = (left, self.last_left, pos, self.last_pos);
        if let (true, true, Some((x, y)), Some((lx, ly))) = dragging {
            let (w, h) = (f64::from(size.0.max(1.0)), f64::from(size.1.max(1.0)));
            self.phi = wrap_phi(self.phi + self.config.drag_fov * f64::from(x - lx) / w);
            self.theta = clamp_theta(self.theta + self.config.drag_fov * f64::from(y - ly) / h);
        }

        self.last_left = left;
        if pos.is_some() {
            self.last_pos = pos;
        }
    }
}

/// Orbit angles driven by the arrow keys at a constant angular speed.
#[derive(Debug, Clone, Default)]
pub struct KeyRotator {
    pub phi: f64,
    pub theta: f64,

    config: RotatorConfig,
}

impl KeyRotator {
    pub fn new(config: RotatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Advances by `dt` seconds according to the held arrow keys.
    pub fn poll(&mut self, input: &InputState, dt: f64) {
        let step = dt * self.config.key_speed;

        if input.key_down(Key::ArrowRight) {
            self.phi += step;
        }
        if input.key_down(Key::ArrowLeft) {
            self.phi -= step;
        }
        self.phi = wrap_phi(self.phi);

        if input.key_down(Key::ArrowUp) {
            self.theta += step;
        }
        if input.key_down(Key::ArrowDown) {
            self.theta -= step;
        }
        self.theta = clamp_theta(self.theta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use crate::input::{InputEvent, InputFrame, KeyState, MouseButtonState, PointerButtonEvent};

    fn press(state: &mut InputState, button: MouseButton, x: f32, y: f32) {
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state: MouseButtonState::Pressed,
                x,
                y,
            }),
        );
    }

    fn move_to(state: &mut InputState, x: f32, y: f32) {
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x, y });
    }

    fn hold(state: &mut InputState, key: Key) {
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
    }

    #[test]
    fn drag_across_the_window_turns_a_quarter() {
        let mut input = InputState::default();
        let mut rot = MouseRotator::default();

        move_to(&mut input, 100.0, 100.0);
        rot.poll(&input, (400.0, 400.0));

        // Press: no rotation on the first held frame.
        press(&mut input, MouseButton::Left, 100.0, 100.0);
        rot.poll(&input, (400.0, 400.0));
        assert_eq!((rot.phi, rot.theta), (0.0, 0.0));

        move_to(&mut input, 500.0, 200.0);
        rot.poll(&input, (400.0, 400.0));
        assert!((rot.phi - FRAC_PI_2).abs() < 1e-9);
        assert!((rot.theta - FRAC_PI_2 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn moving_without_button_does_nothing() {
        let mut input = InputState::default();
        let mut rot = MouseRotator::default();
        move_to(&mut input, 0.0, 0.0);
        rot.poll(&input, (100.0, 100.0));
        move_to(&mut input, 50.0, 50.0);
        rot.poll(&input, (100.0, 100.0));
        assert_eq!((rot.phi, rot.theta), (0.0, 0.0));
    }

    #[test]
    fn drag_left_wraps_phi_and_clamps_theta() {
        let mut input = InputState::default();
        let mut rot = MouseRotator::default();
        press(&mut input, MouseButton::Left, 200.0, 200.0);
        rot.poll(&input, (100.0, 100.0));
        move_to(&mut input, 190.0, 900.0);
        rot.poll(&input, (100.0, 100.0));
        assert!(rot.phi > PI && rot.phi < TAU);
        assert_eq!(rot.theta, FRAC_PI_2);
    }

    #[test]
    fn keys_rotate_with_elapsed_time() {
        let mut input = InputState::default();
        let mut rot = KeyRotator::default();
        hold(&mut input, Key::ArrowRight);
        hold(&mut input, Key::ArrowUp);

        rot.poll(&input, 0.5);
        assert!((rot.phi - FRAC_PI_2 * 0.5).abs() < 1e-9);
        assert!((rot.theta - FRAC_PI_2 * 0.5).abs() < 1e-9);

        rot.poll(&input, 2.0);
        assert_eq!(rot.theta, FRAC_PI_2);
    }

    #[test]
    fn left_key_wraps_below_zero() {
        let mut input = InputState::default();
        let mut rot = KeyRotator::new(RotatorConfig { key_speed: 1.0, ..Default::default() });
        hold(&mut input, Key::ArrowLeft);
        rot.poll(&input, 0.25);
        assert!((rot.phi - (TAU - 0.25)).abs() < 1e-9);
    }
}
