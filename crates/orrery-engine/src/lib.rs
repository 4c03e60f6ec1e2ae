//! Orrery engine crate.
//!
//! Platform and GPU runtime for the lab: window loop, wgpu device, input,
//! frame timing, sphere mesh + renderer and the orbit camera. Scene logic and
//! the transform stack live elsewhere; this crate only consumes finished
//! column-major matrices.

pub mod camera;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod time;
pub mod window;
