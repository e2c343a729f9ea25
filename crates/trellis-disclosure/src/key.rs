//! Keyboard traversal
//!
//! Tabs lay out horizontally and accordions vertically, so the arrow keys
//! that move focus depend on the group. `Home` and `End` work for both.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Map a key name (as reported by `KeyboardEvent.key`) to a direction.
    ///
    /// Returns `None` for keys that do not move focus in this orientation.
    pub fn from_key(key: &str, orientation: Orientation) -> Option<Self> {
        match (key.trim(), orientation) {
            ("Home", _) => Some(Direction::First),
            ("End", _) => Some(Direction::Last),
            ("ArrowRight" | "Right", Orientation::Horizontal) => Some(Direction::Next),
            ("ArrowLeft" | "Left", Orientation::Horizontal) => Some(Direction::Previous),
            ("ArrowDown" | "Down", Orientation::Vertical) => Some(Direction::Next),
            ("ArrowUp" | "Up", Orientation::Vertical) => Some(Direction::Previous),
            _ => None,
        }
    }

    /// Index reached from `current` in a group of `len` triggers, wrapping
    /// at both ends. `len` must be non-zero.
    pub fn target(&self, current: usize, len: usize) -> usize {
        match self {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
            Direction::First => 0,
            Direction::Last => len - 1,
        }
    }
}
