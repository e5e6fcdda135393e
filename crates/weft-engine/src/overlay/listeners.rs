#![forbid(unsafe_code)]

//! Guarded document-level listener registration.
//!
//! Dismissible overlays need document-wide escape and outside-click
//! hooks, and those hooks must never leak: exactly one install per open
//! overlay, exactly one removal no matter how the overlay closes.
//! [`ListenerSet`] enforces that by tracking installation as state and
//! removing on drop as a last resort.
//!
//! Invariants:
//! - `acquire` and `release` are idempotent; double calls are no-ops.
//! - A `ListenerSet` that installed always removes, at the latest on drop.

use std::fmt;

/// Host-provided hooks for document-level listeners.
///
/// The engine never observes the document itself; the host wires real
/// event sources to [`crate::OverlayController::handle_key`] and
/// [`crate::OverlayController::handle_pointer`], and this trait only
/// tells the host *when* those wires should exist.
pub trait DocumentListeners {
    /// Install document-level escape/outside-click listeners.
    fn install(&mut self);
    /// Remove previously installed listeners.
    fn remove(&mut self);
}

/// A no-op host, for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListeners;

impl DocumentListeners for NullListeners {
    fn install(&mut self) {}
    fn remove(&mut self) {}
}

/// Owns the installed/removed state of a host's document listeners.
pub struct ListenerSet {
    hooks: Box<dyn DocumentListeners>,
    installed: bool,
}

impl ListenerSet {
    /// Wrap host hooks in an uninstalled guard.
    pub fn new(hooks: Box<dyn DocumentListeners>) -> Self {
        Self {
            hooks,
            installed: false,
        }
    }

    /// Install the hooks if not already installed.
    pub fn acquire(&mut self) {
        if self.installed {
            return;
        }
        self.hooks.install();
        self.installed = true;
    }

    /// Remove the hooks if installed.
    pub fn release(&mut self) {
        if !self.installed {
            return;
        }
        self.hooks.remove();
        self.installed = false;
    }

    /// Whether the hooks are currently installed.
    #[inline]
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("installed", &self.installed)
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
