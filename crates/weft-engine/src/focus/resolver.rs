#![forbid(unsafe_code)]

//! Focusable-set resolution.
//!
//! [`resolve`] computes the ordered list of elements inside a container
//! that are keyboard-reachable *at query time*: not disabled, not hidden
//! (directly or via a hidden ancestor), and without a negative tab index.
//! The result is a throwaway snapshot. It is intentionally never cached:
//! container content can mutate while a trap is active, and staleness here
//! is a correctness bug, not an inefficiency.

use weft_core::{ElementId, ElementTree};

/// An ordered snapshot of keyboard-reachable elements.
///
/// Order follows document (preorder) order. An empty set is valid — e.g.
/// an overlay with no interactive content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusableSet {
    ids: Vec<ElementId>,
}

impl FocusableSet {
    /// First element in document order.
    #[must_use]
    pub fn first(&self) -> Option<ElementId> {
        self.ids.first().copied()
    }

    /// Last element in document order.
    #[must_use]
    pub fn last(&self) -> Option<ElementId> {
        self.ids.last().copied()
    }

    /// Position of an element within the set.
    #[must_use]
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.ids.iter().position(|x| *x == id)
    }

    /// Whether the set contains an element.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The elements as a slice, in document order.
    #[must_use]
    pub fn as_slice(&self) -> &[ElementId] {
        &self.ids
    }

    /// Iterate over the elements in document order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }
}

/// Compute the focusable set of `container`.
///
/// Pure and cheap: no side effects, no persistent state, safe to call on
/// every key press. The container itself is never part of the set. A
/// hidden container (or a missing one) yields an empty set.
#[must_use]
pub fn resolve(tree: &ElementTree, container: ElementId) -> FocusableSet {
    let mut ids = Vec::new();
    let Some(root) = tree.get(container) else {
        return FocusableSet { ids };
    };
    if root.hidden {
        return FocusableSet { ids };
    }

    // Preorder walk that prunes hidden subtrees; disabled elements are
    // skipped but their children remain reachable.
    let mut stack: Vec<ElementId> = tree.children(container).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(el) = tree.get(id) else { continue };
        if el.hidden {
            continue;
        }
        if !el.disabled && el.tab_index >= 0 {
            ids.push(id);
        }
        for child in tree.children(id).iter().rev() {
            stack.push(*child);
        }
    }

    FocusableSet { ids }
}

// =========================================================================
// Tests
// =========================================================================
