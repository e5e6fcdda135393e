#![forbid(unsafe_code)]

//! Listbox navigator: the dropdown/select pattern.
//!
//! The highlighted item (`active`) and the committed selection
//! (`selected`) are decoupled until an explicit commit. Arrow keys move
//! the highlight through enabled items with wraparound; Enter, Space,
//! or a click commits the highlight and closes the list. Home/End move
//! the highlight unconditionally, disabled targets included, matching
//! their visual-focus semantics.
//!
//! Invariants:
//! - `active`, when set by movement or open, addresses an enabled item;
//!   only Home/End may park it on a disabled one.
//! - `selected` only changes through a commit, and commits only land on
//!   enabled items.
//! - Illegal requests (commit with no highlight, movement with zero
//!   enabled items) are silent no-ops and emit nothing.

use tracing::debug;
use weft_core::{KeyCode, KeyEvent, Notifier};

use super::indexed::{Direction, Item, first_enabled, step_enabled};

/// Snapshot of a listbox's navigable state, sent on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListboxState {
    pub open: bool,
    pub active: Option<usize>,
    pub selected: Option<usize>,
}

/// A committed selection, sent on [`Listbox::on_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub index: usize,
    pub value: String,
}

/// Keyboard-driven state for one dropdown/select widget.
#[derive(Debug)]
pub struct Listbox {
    items: Vec<Item>,
    open: bool,
    active: Option<usize>,
    selected: Option<usize>,
    on_state_change: Notifier<ListboxState>,
    on_commit: Notifier<Committed>,
}

impl Listbox {
    /// A closed listbox over `items`, nothing selected.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            open: false,
            active: None,
            selected: None,
            on_state_change: Notifier::new(),
            on_commit: Notifier::new(),
        }
    }

    /// The items being navigated.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Replace the item list.
    ///
    /// Indices that no longer exist are cleared; a selection surviving
    /// the swap is the host's concern, so `selected` is kept only while
    /// it stays in bounds.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        let len = self.items.len();
        self.active = self.active.filter(|&i| i < len);
        self.selected = self.selected.filter(|&i| i < len);
        self.emit_state();
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Highlighted index, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Committed selection index, if any.
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> ListboxState {
        ListboxState {
            open: self.open,
            active: self.active,
            selected: self.selected,
        }
    }

    /// Channel notified with a fresh snapshot after every transition.
    #[must_use]
    pub fn on_state_change(&self) -> &Notifier<ListboxState> {
        &self.on_state_change
    }

    /// Channel notified once per committed selection.
    #[must_use]
    pub fn on_commit(&self) -> &Notifier<Committed> {
        &self.on_commit
    }

    fn emit_state(&self) {
        self.on_state_change.emit(&self.state());
    }

    /// Open the list.
    ///
    /// The highlight lands on the committed selection when it exists
    /// and is enabled, else the first enabled item, else nowhere.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.active = self
            .selected
            .filter(|&i| !self.items[i].disabled)
            .or_else(|| first_enabled(&self.items));
        debug!(active = ?self.active, "listbox opened");
        self.emit_state();
    }

    /// Close without committing. The highlight is cleared; the committed
    /// selection is untouched. No-op when already closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.active = None;
        self.emit_state();
    }

    /// Move the highlight to the next enabled item, wrapping.
    pub fn move_next(&mut self) {
        self.step(Direction::Forward);
    }

    /// Move the highlight to the previous enabled item, wrapping.
    pub fn move_previous(&mut self) {
        self.step(Direction::Backward);
    }

    fn step(&mut self, dir: Direction) {
        let Some(next) = step_enabled(&self.items, self.active, dir) else {
            return;
        };
        if self.active == Some(next) {
            return;
        }
        self.active = Some(next);
        self.emit_state();
    }

    /// Move the highlight to the first item, disabled or not.
    pub fn jump_to_first(&mut self) {
        self.jump(0);
    }

    /// Move the highlight to the last item, disabled or not.
    pub fn jump_to_last(&mut self) {
        self.jump(self.items.len().saturating_sub(1));
    }

    fn jump(&mut self, idx: usize) {
        if self.items.is_empty() || self.active == Some(idx) {
            return;
        }
        self.active = Some(idx);
        self.emit_state();
    }

    /// Commit the highlighted item.
    ///
    /// Sets the selection, closes the list, and emits one commit
    /// notification carrying the item's value. With no highlight, or a
    /// highlight on a disabled item, nothing happens and nothing fires.
    pub fn commit_active(&mut self) {
        if let Some(idx) = self.active {
            self.commit_at(idx);
        }
    }

    /// Commit the item at `idx` directly (pointer click on an option).
    ///
    /// Same rules as [`Self::commit_active`]: out-of-bounds or disabled
    /// targets are silent no-ops.
    pub fn commit_at(&mut self, idx: usize) {
        let Some(item) = self.items.get(idx) else {
            return;
        };
        if item.disabled {
            return;
        }
        let value = item.value.clone();
        self.selected = Some(idx);
        self.open = false;
        self.active = None;
        debug!(index = idx, value = %value, "listbox committed");
        self.emit_state();
        self.on_commit.emit(&Committed { index: idx, value });
    }

    /// React to a key press the host dispatched to this listbox.
    ///
    /// Down/Up open a closed list and move an open one; Enter and Space
    /// commit when open and open when closed; Escape closes without
    /// committing; Home/End jump. Other keys are ignored.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Down | KeyCode::Up => {
                if !self.open {
                    self.open();
                } else if event.code == KeyCode::Down {
                    self.move_next();
                } else {
                    self.move_previous();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.open {
                    self.commit_active();
                } else {
                    self.open();
                }
            }
            KeyCode::Escape => self.close(),
            KeyCode::Home => self.jump_to_first(),
            KeyCode::End => self.jump_to_last(),
            _ => {}
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
