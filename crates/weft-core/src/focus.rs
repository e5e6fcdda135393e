#![forbid(unsafe_code)]

//! Logical focus owner.
//!
//! The engine decides *which* element should hold focus; the host mirrors
//! that decision onto real input focus after each transition. `FocusContext`
//! is that single source of truth, with a take-style event accessor so
//! hosts can cheaply detect changes during re-render.

use crate::element::{ElementId, ElementTree};

/// Focus change events recorded by the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Gained { id: ElementId },
    Lost { id: ElementId },
    Moved { from: ElementId, to: ElementId },
}

/// Tracks the element that logically holds input focus.
#[derive(Debug, Default)]
pub struct FocusContext {
    current: Option<ElementId>,
    last_event: Option<FocusEvent>,
}

impl FocusContext {
    /// Create a context with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The element currently holding focus.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Whether a specific element is focused.
    #[must_use]
    pub fn is_focused(&self, id: ElementId) -> bool {
        self.current == Some(id)
    }

    /// Move focus to `id`. Returns `true` if focus changed.
    ///
    /// The element must exist in the tree; focusing a missing element or
    /// the already-focused element is a no-op.
    pub fn set(&mut self, id: ElementId, tree: &ElementTree) -> bool {
        if !tree.contains(id) || self.current == Some(id) {
            return false;
        }
        let prev = self.current.replace(id);
        self.last_event = Some(match prev {
            Some(from) => FocusEvent::Moved { from, to: id },
            None => FocusEvent::Gained { id },
        });
        true
    }

    /// Remove focus entirely. Returns the previously focused element.
    pub fn blur(&mut self) -> Option<ElementId> {
        let prev = self.current.take();
        if let Some(id) = prev {
            self.last_event = Some(FocusEvent::Lost { id });
        }
        prev
    }

    /// Take and clear the last focus event.
    pub fn take_event(&mut self) -> Option<FocusEvent> {
        self.last_event.take()
    }
}

// =========================================================================
// Tests
// =========================================================================
