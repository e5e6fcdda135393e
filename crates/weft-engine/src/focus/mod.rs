#![forbid(unsafe_code)]

//! Focusable-set resolution and focus trapping.

mod resolver;
mod trap;

pub use resolver::{FocusableSet, resolve};
pub use trap::TrapState;
