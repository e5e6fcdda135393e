#![forbid(unsafe_code)]

//! Dismissible overlays: lifecycle state machine, dismissal channels,
//! and guarded document-listener ownership.

mod controller;
mod listeners;

pub use controller::{
    DismissReason, OverlayCmd, OverlayConfig, OverlayController, OverlayState, SettleToken,
};
pub use listeners::{DocumentListeners, ListenerSet, NullListeners};
