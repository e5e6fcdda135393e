#![forbid(unsafe_code)]

//! Deterministic host simulation for exercising weft engines.
//!
//! Real hosts supply an element tree, a focus sink, document listeners,
//! and a timer primitive. This crate fakes all four with inspectable,
//! manually-driven stand-ins so lifecycle behavior can be asserted
//! without a UI runtime: timers fire only when a test says so, and every
//! listener install/remove is counted.
//!
//! Nothing here is a test itself; integration suites build on these
//! pieces.

pub mod host;
pub mod timers;

pub use host::{CountingListeners, HostSim, ListenerLog, overlay_tree};
pub use timers::ManualTimerQueue;
