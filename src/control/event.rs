//! Input events raised on a control's own visual element.

use crate::geometry::Point;

/// Keyboard keys relevant to range navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    /// Any other key: starts an interaction but does not move the value
    Other,
}

impl Key {
    /// Parse a key from its DOM `key` name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            "ArrowUp" | "Up" => Some(Self::ArrowUp),
            "ArrowDown" | "Down" => Some(Self::ArrowDown),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Other" | "Tab" | "Enter" | "Space" => Some(Self::Other),
            _ => None,
        }
    }
}

/// An event on the control element itself.
///
/// Window-scoped events (moves, releases outside the element) arrive through
/// [`crate::viewport::ViewportEvent`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEvent {
    MouseDown,
    TouchStart,
    /// Touch points of the move, in event order; only the first is used
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    KeyDown(Key),
    KeyUp,
}
