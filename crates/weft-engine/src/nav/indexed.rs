#![forbid(unsafe_code)]

//! Indexed navigation over an item list: wraparound stepping that skips
//! disabled items.
//!
//! Both navigators call into [`step_enabled`]; neither reimplements the
//! skip/wrap search. The search tolerates a starting index that is
//! itself disabled (the active item may be disabled out from under a
//! widget) and a starting index of `None` (nothing active yet).
//!
//! Invariant: every index returned from this module addresses an
//! enabled item, or is `None` when the list has no enabled items.

/// One option in a composite widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The value committed when this item is selected.
    pub value: String,
    /// Human-readable label; the engine carries it but never renders it.
    pub label: String,
    /// Disabled items are skipped by navigation and refuse commits.
    pub disabled: bool,
}

impl Item {
    /// An enabled item.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Which way a step moves through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Step from `from` to the next enabled index in `dir`, wrapping around
/// the full list.
///
/// With `from == None` the search starts at the first (or last) slot.
/// Returns `None` when no enabled item exists. A full wrap that lands
/// back on an enabled `from` returns `from` itself (single-enabled-item
/// lists step in place).
#[must_use]
pub fn step_enabled(items: &[Item], from: Option<usize>, dir: Direction) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let len = items.len();
    let start = match (from, dir) {
        (Some(i), Direction::Forward) => (i + 1) % len,
        (Some(i), Direction::Backward) => (i + len - 1) % len,
        (None, Direction::Forward) => 0,
        (None, Direction::Backward) => len - 1,
    };
    let mut idx = start;
    for _ in 0..len {
        if !items[idx].disabled {
            return Some(idx);
        }
        idx = match dir {
            Direction::Forward => (idx + 1) % len,
            Direction::Backward => (idx + len - 1) % len,
        };
    }
    None
}

/// Index of the first enabled item, if any.
#[must_use]
pub fn first_enabled(items: &[Item]) -> Option<usize> {
    items.iter().position(|it| !it.disabled)
}

/// Index of the last enabled item, if any.
#[must_use]
pub fn last_enabled(items: &[Item]) -> Option<usize> {
    items.iter().rposition(|it| !it.disabled)
}

// =========================================================================
// Tests
// =========================================================================
