#![forbid(unsafe_code)]

//! Focus trap: confine Tab cycling inside a container.
//!
//! Arming a trap records whoever held focus, moves focus into the
//! container, and from then on answers "where should Tab go" for key
//! presses the host forwards. The focusable set is re-resolved on every
//! press — content inside the container may change while the trap is
//! active. Disarming restores focus to the recorded owner if it still
//! exists.
//!
//! At most one trap is active per overlay instance; nested traps are the
//! host's problem, not this type's.

use tracing::debug;
use weft_core::{ElementId, ElementTree, FocusContext};

use super::resolver::resolve;

/// State of an armed (or spent) focus trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapState {
    container: ElementId,
    previously_focused: Option<ElementId>,
    active: bool,
}

impl TrapState {
    /// Arm a trap on `container`.
    ///
    /// Records the current focus owner, then moves focus to the first
    /// focusable element of the container — or to the container itself
    /// when it has none, so keyboard events still have a destination.
    pub fn arm(tree: &ElementTree, focus: &mut FocusContext, container: ElementId) -> Self {
        let previous = focus.current();
        Self::arm_returning_to(tree, focus, container, previous)
    }

    /// Arm a trap that will restore focus to `return_to` on disarm,
    /// regardless of who holds focus right now.
    ///
    /// Overlay controllers use this: the trigger's focus owner is captured
    /// at open *request* time, while the trap is only armed once the enter
    /// transition has settled.
    pub fn arm_returning_to(
        tree: &ElementTree,
        focus: &mut FocusContext,
        container: ElementId,
        return_to: Option<ElementId>,
    ) -> Self {
        let set = resolve(tree, container);
        match set.first() {
            Some(first) => {
                focus.set(first, tree);
            }
            None => {
                focus.set(container, tree);
            }
        }
        debug!(container, ?return_to, "focus trap armed");
        Self {
            container,
            previously_focused: return_to,
            active: true,
        }
    }

    /// The container this trap confines focus to.
    #[must_use]
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The focus owner recorded for restoration.
    #[must_use]
    pub fn previously_focused(&self) -> Option<ElementId> {
        self.previously_focused
    }

    /// Whether the trap is currently armed.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Answer a Tab press while trapped.
    ///
    /// Returns the element focus should wrap to, or `None` when default
    /// Tab behavior may proceed unmodified (focus is mid-sequence, the set
    /// is empty, or the trap is spent). The set is re-resolved on each
    /// call, never cached from arm time.
    #[must_use = "apply the returned wrap target (if any) to the focus context"]
    pub fn handle_tab(
        &self,
        tree: &ElementTree,
        focus: &FocusContext,
        shift: bool,
    ) -> Option<ElementId> {
        if !self.active {
            return None;
        }
        let set = resolve(tree, self.container);
        if set.is_empty() {
            return None;
        }
        let current = focus.current()?;
        if shift && Some(current) == set.first() {
            set.last()
        } else if !shift && Some(current) == set.last() {
            set.first()
        } else {
            None
        }
    }

    /// Disarm the trap and restore focus.
    ///
    /// Restores focus to the recorded owner if it still exists in the
    /// tree; otherwise falls back silently to default placement (blur).
    /// Disarming twice is a no-op.
    pub fn disarm(&mut self, tree: &ElementTree, focus: &mut FocusContext) {
        if !self.active {
            return;
        }
        self.active = false;
        debug!(container = self.container, "focus trap disarmed");
        if let Some(prev) = self.previously_focused
            && tree.contains(prev)
        {
            focus.set(prev, tree);
            return;
        }
        let _ = focus.blur();
    }
}

// =========================================================================
// Tests
// =========================================================================
