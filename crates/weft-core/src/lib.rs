#![forbid(unsafe_code)]

//! Core: element handles, input events, and change notification.
//!
//! # Role in Weft
//! `weft-core` is the shared vocabulary between hosts and the interaction
//! engine. It owns the element tree that hosts populate, the normalized
//! key/pointer event types the engine consumes, and the observer channel
//! the engine uses to announce state transitions.
//!
//! # Primary responsibilities
//! - **ElementTree**: host-owned tree of opaque element handles with
//!   disabled/hidden/tab-index flags and document-order traversal.
//! - **Event**: canonical input events (keys with modifiers, pointers with
//!   an optional target element).
//! - **FocusContext**: the logical focus owner that hosts mirror to real
//!   input focus.
//! - **Notifier**: callback registration with RAII subscription guards.
//!
//! # How it fits in the system
//! The engine (`weft-engine`) reads the tree and focus context, reacts to
//! events the host dispatches, and emits notifications through `Notifier`
//! channels. This crate performs no I/O and never creates elements; the
//! host/visual layer owns rendering entirely.

pub mod element;
pub mod event;
pub mod focus;
pub mod notify;

pub use element::{Element, ElementId, ElementTree};
pub use event::{KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent};
pub use focus::{FocusContext, FocusEvent};
pub use notify::{Notifier, Subscription};
