#![forbid(unsafe_code)]

//! The Weft interaction engine: focus confinement, dismissible overlays,
//! and keyboard navigation for composite widgets.
//!
//! # Role in Weft
//! Most controls in a component library are style-only renderers with no
//! internal state machine. This crate is the part that is not: the shared
//! focus and keyboard-interaction engine behind modal dialogs, dropdowns,
//! radio groups, and tab strips.
//!
//! # Primary responsibilities
//! - **Focusable-set resolution** ([`focus::resolve`]): which elements in a
//!   container are keyboard-reachable right now.
//! - **Focus trapping** ([`focus::TrapState`]): confine Tab cycling inside
//!   a container and restore focus on release.
//! - **Overlay lifecycle** ([`overlay::OverlayController`]): open/close
//!   state with settle delays, Escape and outside-pointer dismissal, and a
//!   leak-free global listener discipline.
//! - **Indexed navigation** ([`nav`]): one disabled-skipping wraparound
//!   algorithm behind both the listbox (decoupled highlight/commit) and
//!   the roving-tabindex group (movement is selection).
//!
//! # How it fits in the system
//! A host control owns one controller or navigator instance, feeds it
//! key/pointer events, executes the [`overlay::OverlayCmd`] timer requests
//! it returns, and re-renders from its state after each transition. The
//! engine never creates elements and never touches styling.

pub mod focus;
pub mod nav;
pub mod overlay;

pub use focus::{FocusableSet, TrapState, resolve};
pub use nav::{Committed, Item, Listbox, ListboxState, RovingGroup, RovingState};
pub use overlay::{
    DismissReason, DocumentListeners, ListenerSet, NullListeners, OverlayCmd, OverlayConfig,
    OverlayController, OverlayState, SettleToken,
};
