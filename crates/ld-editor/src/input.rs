//! Input abstraction layer.
//!
//! Normalizes host pointer, wheel and keyboard events into a unified
//! `InputEvent` enum consumed by the interaction controller. Pointer
//! coordinates are in screen (viewport) pixels.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { x: f32, y: f32, modifiers: Modifiers },

    PointerMove { x: f32, y: f32, modifiers: Modifiers },

    /// Pointer released.
    PointerUp { x: f32, y: f32, modifiers: Modifiers },

    /// Mouse wheel. Negative `delta_y` scrolls up (zoom in).
    Wheel { x: f32, y: f32, delta_y: f32 },

    /// Keyboard key; `key` is the DOM `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer or wheel event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_of_pointer_events() {
        assert_eq!(InputEvent::pointer_down(1.0, 2.0).position(), Some((1.0, 2.0)));
        assert_eq!(
            InputEvent::Wheel { x: 3.0, y: 4.0, delta_y: -1.0 }.position(),
            Some((3.0, 4.0))
        );
        assert_eq!(InputEvent::key("z", Modifiers::NONE).position(), None);
    }

    #[test]
    fn command_is_ctrl_or_meta() {
        assert!(!Modifiers::SHIFT.command());
        assert!(Modifiers { meta: true, ..Modifiers::NONE }.command());
        assert!(Modifiers { ctrl: true, ..Modifiers::NONE }.command());
    }
}
