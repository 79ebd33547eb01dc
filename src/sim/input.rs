//! Held-key state fed by the platform's keyboard events

use serde::{Deserialize, Serialize};

/// Non-character keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    Other,
}

/// Escape as a character key
pub const ESCAPE: char = '\u{1b}';

/// Which physical key-set to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySet {
    /// W / S
    Wasd,
    /// Arrow keys
    Arrows,
    /// Either of the above
    Either,
}

/// Current held state of the movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub special_up: bool,
    pub special_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a character key press/release. Unknown keys are ignored.
    pub fn set_key(&mut self, key: char, pressed: bool) {
        match key.to_ascii_lowercase() {
            'w' => self.up = pressed,
            's' => self.down = pressed,
            _ => {}
        }
    }

    /// Record a special key press/release. Unknown keys are ignored.
    pub fn set_special_key(&mut self, key: SpecialKey, pressed: bool) {
        match key {
            SpecialKey::Up => self.special_up = pressed,
            SpecialKey::Down => self.special_down = pressed,
            _ => {}
        }
    }

    /// (up, down) held flags for a key-set
    pub fn held(&self, keys: KeySet) -> (bool, bool) {
        match keys {
            KeySet::Wasd => (self.up, self.down),
            KeySet::Arrows => (self.special_up, self.special_down),
            KeySet::Either => (
                self.up || self.special_up,
                self.down || self.special_down,
            ),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
