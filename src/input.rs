//! Held-key input map
//!
//! Keyboard listeners and on-screen touch buttons both feed `HeldKeys` with
//! `KeyboardEvent.code` strings, so touch is just a synthetic keyboard.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Drop a post / start a run
    Action,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Action];

    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Action),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Key::Up => "ArrowUp",
            Key::Down => "ArrowDown",
            Key::Left => "ArrowLeft",
            Key::Right => "ArrowRight",
            Key::Action => "Space",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Boolean "is held" map for every `Key`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; Key::ALL.len()],
}

impl HeldKeys {
    /// Record a press. Returns true on the transition from released to held.
    pub fn press(&mut self, key: Key) -> bool {
        let was_held = self.held[key.index()];
        self.held[key.index()] = true;
        !was_held
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Drop everything (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.held = [false; Key::ALL.len()];
    }

    /// Snapshot of the directional keys for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
        }
    }
}
