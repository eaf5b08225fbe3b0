//! Held-key tracking
//!
//! Key events only flip entries in a set; the simulation polls the set once
//! per tick through [`InputState::poll`].

use std::collections::HashSet;

use crate::sim::TickInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (arrows, WASD, space)
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "Down" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forget everything (window lost focus, keyup events will not arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot the held keys for one tick
    pub fn poll(&self, now_ms: f64) -> TickInput {
        TickInput {
            up: self.is_down(Key::Up),
            down: self.is_down(Key::Down),
            left: self.is_down(Key::Left),
            right: self.is_down(Key::Right),
            fire: self.is_down(Key::Fire),
            now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("a"), Some(Key::Left));
        assert_eq!(Key::from_dom("W"), Some(Key::Up));
        assert_eq!(Key::from_dom(" "), Some(Key::Fire));
        assert_eq!(Key::from_dom("Escape"), None);
    }

    #[test]
    fn test_press_release_poll() {
        let mut input = InputState::new();
        input.press(Key::Right);
        input.press(Key::Fire);
        assert!(input.is_down(Key::Right));

        let polled = input.poll(250.0);
        assert!(polled.right && polled.fire);
        assert!(!polled.left && !polled.up && !polled.down);
        assert_eq!(polled.now_ms, 250.0);

        input.release(Key::Fire);
        assert!(!input.poll(0.0).fire);
    }

    #[test]
    fn test_clear_releases_all() {
        let mut input = InputState::new();
        input.press(Key::Up);
        input.press(Key::Left);
        input.clear();
        assert!(!input.is_down(Key::Up));
        assert!(!input.is_down(Key::Left));
    }
}
