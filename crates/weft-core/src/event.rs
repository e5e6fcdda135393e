#![forbid(unsafe_code)]

//! Normalized input events the engine consumes.
//!
//! Hosts translate whatever their platform delivers (DOM events, terminal
//! escape sequences) into these types and dispatch them to the controller
//! or navigator that owns the interaction. Only key *presses* are
//! represented; hosts filter out repeats and releases they do not want the
//! engine to see.

use crate::element::ElementId;
use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character. Space is `Char(' ')`.
    Char(char),
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Builder: set modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether Shift is held.
    #[inline]
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// A pointer press.
///
/// `target` is the element under the pointer, or `None` when the press
/// landed on no registered element (which always counts as outside any
/// container).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: Option<ElementId>,
    pub button: PointerButton,
}

impl PointerEvent {
    /// Create a primary-button press on the given target.
    #[must_use]
    pub const fn new(target: Option<ElementId>) -> Self {
        Self {
            target,
            button: PointerButton::Primary,
        }
    }

    /// Builder: set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults() {
        let ev = KeyEvent::new(KeyCode::Enter);
        assert_eq!(ev.code, KeyCode::Enter);
        assert!(ev.modifiers.is_empty());
        assert!(!ev.shift());
    }

    #[test]
    fn key_event_with_shift() {
        let ev = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(ev.shift());
    }

    #[test]
    fn key_event_from_code() {
        let ev: KeyEvent = KeyCode::Escape.into();
        assert_eq!(ev.code, KeyCode::Escape);
    }

    #[test]
    fn pointer_event_defaults_primary() {
        let ev = PointerEvent::new(Some(3));
        assert_eq!(ev.target, Some(3));
        assert_eq!(ev.button, PointerButton::Primary);
    }

    #[test]
    fn pointer_event_no_target() {
        let ev = PointerEvent::new(None).with_button(PointerButton::Secondary);
        assert_eq!(ev.target, None);
        assert_eq!(ev.button, PointerButton::Secondary);
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(m.contains(Modifiers::CTRL));
        assert!(!m.contains(Modifiers::ALT));
    }
}
