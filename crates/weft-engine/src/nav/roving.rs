#![forbid(unsafe_code)]

//! Roving tabindex group: the radio-group / tab-strip pattern.
//!
//! One item is the tab stop at a time; arrow keys move it. Unlike the
//! listbox there is no separate commit step: every successful move *is*
//! a selection and fires one change notification. The host mirrors the
//! logical index to real input focus after each move; this type only
//! tracks the index.
//!
//! Invariant: `active`, if set, always addresses an enabled item.

use tracing::debug;
use weft_core::{KeyCode, KeyEvent, Notifier};

use super::indexed::{Direction, Item, first_enabled, last_enabled, step_enabled};
use super::listbox::Committed;

/// Snapshot of a roving group's state, sent on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RovingState {
    /// The single tab stop. Active and selected are one and the same.
    pub active: Option<usize>,
}

/// Keyboard-driven state for one radio group or tab strip.
#[derive(Debug)]
pub struct RovingGroup {
    items: Vec<Item>,
    active: Option<usize>,
    on_state_change: Notifier<RovingState>,
    on_change: Notifier<Committed>,
}

impl RovingGroup {
    /// A group over `items` with the tab stop on the first enabled item.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        let active = first_enabled(&items);
        Self {
            items,
            active,
            on_state_change: Notifier::new(),
            on_change: Notifier::new(),
        }
    }

    /// The items being navigated.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The current tab stop.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> RovingState {
        RovingState {
            active: self.active,
        }
    }

    /// Channel notified with a fresh snapshot after every move.
    #[must_use]
    pub fn on_state_change(&self) -> &Notifier<RovingState> {
        &self.on_state_change
    }

    /// Channel notified once per selection change, with the item value.
    #[must_use]
    pub fn on_change(&self) -> &Notifier<Committed> {
        &self.on_change
    }

    /// Replace the item list. The tab stop re-seats onto the same index
    /// when it survives enabled, else the first enabled item.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.active = self
            .active
            .filter(|&i| self.items.get(i).is_some_and(|it| !it.disabled))
            .or_else(|| first_enabled(&self.items));
        self.on_state_change.emit(&self.state());
    }

    fn activate(&mut self, idx: usize) {
        if self.active == Some(idx) {
            return;
        }
        self.active = Some(idx);
        debug!(index = idx, value = %self.items[idx].value, "roving tab stop moved");
        self.on_state_change.emit(&self.state());
        self.on_change.emit(&Committed {
            index: idx,
            value: self.items[idx].value.clone(),
        });
    }

    /// Move the tab stop to the next enabled item, wrapping. No-op when
    /// no enabled item exists or the move lands where it started.
    pub fn move_next(&mut self) {
        if let Some(next) = step_enabled(&self.items, self.active, Direction::Forward) {
            self.activate(next);
        }
    }

    /// Move the tab stop to the previous enabled item, wrapping.
    pub fn move_previous(&mut self) {
        if let Some(prev) = step_enabled(&self.items, self.active, Direction::Backward) {
            self.activate(prev);
        }
    }

    /// Move the tab stop to the first enabled item.
    pub fn jump_to_first(&mut self) {
        if let Some(first) = first_enabled(&self.items) {
            self.activate(first);
        }
    }

    /// Move the tab stop to the last enabled item.
    pub fn jump_to_last(&mut self) {
        if let Some(last) = last_enabled(&self.items) {
            self.activate(last);
        }
    }

    /// Select `idx` directly (pointer click on an item). Disabled and
    /// out-of-bounds targets are silent no-ops.
    pub fn set_active(&mut self, idx: usize) {
        if self.items.get(idx).is_some_and(|it| !it.disabled) {
            self.activate(idx);
        }
    }

    /// React to a key press the host dispatched to this group.
    ///
    /// Both arrow axes move (a radio group is semantically 1-D; hosts
    /// dispatch whichever axis their layout uses). Home/End jump to the
    /// first/last enabled item.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Down | KeyCode::Right => self.move_next(),
            KeyCode::Up | KeyCode::Left => self.move_previous(),
            KeyCode::Home => self.jump_to_first(),
            KeyCode::End => self.jump_to_last(),
            _ => {}
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
