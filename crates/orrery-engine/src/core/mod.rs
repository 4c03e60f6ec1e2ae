//! Contract between the runtime loop and the application.
//!
//! The runtime owns the window, GPU state, input and timing; the application only
//! sees them through a per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
