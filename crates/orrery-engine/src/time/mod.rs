//! Frame timing.
//!
//! Everything here is owned by one render loop (one window), so several loops
//! or tests never share timing state:
//! - `FrameClock` produces per-frame delta and session time
//! - `FpsCounter` turns frame timestamps into a once-per-second FPS readout

mod fps;
mod frame_clock;

pub use fps::{FpsCounter, FpsSample};
pub use frame_clock::{FrameClock, FrameTime};
