//! Camera controls and projection.
//!
//! The lab camera is an orbit: the view transform is
//! `translate(0, 0, -distance) · rot_x(theta) · rot_y(phi)`, with `phi`/`theta`
//! driven by one of the rotators below.

mod projection;
mod rotator;

pub use projection::Projection;
pub use rotator::{KeyRotator, MouseRotator, RotatorConfig};
