#![forbid(unsafe_code)]

//! Observer channel with RAII subscription guards.
//!
//! # Design
//!
//! [`Notifier<T>`] holds a list of callbacks as weak references; each
//! [`Subscription`] guard owns the strong reference. Dropping the guard
//! unsubscribes the callback. Unlike a value store, a notifier carries no
//! state of its own: callers pass the event to [`Notifier::emit`] and it is
//! delivered synchronously, in registration order.
//!
//! # Failure Modes
//!
//! - **Re-entrant subscribe**: Safe. `emit` snapshots the live callbacks
//!   and releases the list borrow before invoking them, so a callback may
//!   register new subscribers. A subscriber added mid-delivery is not
//!   invoked for the event being delivered, only for later ones.
//! - **Subscriber leak**: A `Subscription` stored forever keeps its
//!   callback alive. Dead weak references are pruned lazily during
//!   `emit()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// A list of callbacks invoked synchronously on each emitted event.
///
/// # Invariants
///
/// 1. Callbacks run in registration order.
/// 2. A callback whose [`Subscription`] has been dropped is never invoked.
/// 3. Dead entries are pruned lazily on the next `emit()`.
pub struct Notifier<T> {
    subscribers: RefCell<Vec<CallbackWeak<T>>>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<T> Notifier<T> {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback. It is invoked with a reference to each emitted
    /// event until the returned [`Subscription`] guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.subscribers.borrow_mut().push(weak);
        // Type-erase the strong Rc; dropping the guard drops the callback.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver an event to all live subscribers, pruning dead ones.
    pub fn emit(&self, value: &T) {
        // Collect live callbacks first so the borrow is not held during calls.
        let callbacks: Vec<CallbackRc<T>> = {
            let mut subs = self.subscribers.borrow_mut();
            subs.retain(|w| w.strong_count() > 0);
            subs.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in &callbacks {
            cb(value);
        }
    }

    /// Number of registered subscribers (including dead ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// RAII guard for a registered callback.
///
/// Dropping the guard drops the strong reference to the callback, so the
/// weak entry in the notifier's list fails to upgrade and the callback is
/// never invoked again.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
