use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Transitions recorded during the current frame.
///
/// `InputState` says what is held right now; `InputFrame` says what changed
/// since the last frame. The runtime clears it after each `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    /// True if `key` went down this frame (repeats excluded).
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
