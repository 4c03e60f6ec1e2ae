//! Window + runtime loop.
//!
//! Owns the winit event loop and the single lab window, wired to its GPU
//! surface, input state, frame clock and FPS counter.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
