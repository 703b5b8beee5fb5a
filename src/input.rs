//! Keyboard mapping for the game controls

use crate::sim::Direction;

/// Logical control signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Move(Direction),
    /// Close the game regardless of its state
    Dismiss,
}

impl Control {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::Move(Direction::Left)),
            "ArrowRight" => Some(Control::Move(Direction::Right)),
            "Escape" => Some(Control::Dismiss),
            _ => None,
        }
    }
}
