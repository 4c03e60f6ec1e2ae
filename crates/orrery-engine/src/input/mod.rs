//! Input subsystem.
//!
//! The public types are platform-agnostic; the runtime translates winit events
//! into `InputEvent`s (see `platform`) and folds them into `InputState`.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};
