#![forbid(unsafe_code)]

//! Composite widget navigation: one wraparound, disabled-skipping index
//! search shared by the listbox and roving-tabindex navigators.

mod indexed;
mod listbox;
mod roving;

pub use indexed::{Direction, Item, first_enabled, last_enabled, step_enabled};
pub use listbox::{Committed, Listbox, ListboxState};
pub use roving::{RovingGroup, RovingState};
