#![forbid(unsafe_code)]

//! A fake host wired to one overlay controller.
//!
//! [`HostSim`] owns the element tree, the focus context, a counting
//! listener implementation, and a [`ManualTimerQueue`], and routes
//! controller commands into the queue. Tests drive it like a host
//! would: request transitions, fire timers, send document events, then
//! assert on the pieces.

use std::cell::RefCell;
use std::rc::Rc;

use weft_core::{ElementId, ElementTree, FocusContext, KeyCode, KeyEvent, Modifiers, PointerEvent};
use weft_engine::{
    DismissReason, DocumentListeners, OverlayCmd, OverlayConfig, OverlayController, SettleToken,
};

use crate::timers::ManualTimerQueue;

/// Tally of listener installs and removes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenerLog {
    pub installs: usize,
    pub removes: usize,
}

/// A [`DocumentListeners`] implementation that only counts.
#[derive(Debug, Clone)]
pub struct CountingListeners {
    log: Rc<RefCell<ListenerLog>>,
}

impl CountingListeners {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Rc::default(),
        }
    }

    /// Shared handle onto the tally, for asserting after the overlay is
    /// gone.
    #[must_use]
    pub fn log(&self) -> Rc<RefCell<ListenerLog>> {
        Rc::clone(&self.log)
    }
}

impl Default for CountingListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentListeners for CountingListeners {
    fn install(&mut self) {
        self.log.borrow_mut().installs += 1;
    }
    fn remove(&mut self) {
        self.log.borrow_mut().removes += 1;
    }
}

/// One overlay, one tree, one timer queue: a host in miniature.
#[derive(Debug)]
pub struct HostSim {
    pub tree: ElementTree,
    pub focus: FocusContext,
    pub overlay: OverlayController,
    pub timers: ManualTimerQueue,
    listener_log: Rc<RefCell<ListenerLog>>,
}

impl HostSim {
    /// Build a host around an existing tree and overlay container.
    #[must_use]
    pub fn new(tree: ElementTree, container: ElementId, config: OverlayConfig) -> Self {
        let hooks = CountingListeners::new();
        let listener_log = hooks.log();
        Self {
            tree,
            focus: FocusContext::new(),
            overlay: OverlayController::new(container, config, Box::new(hooks)),
            timers: ManualTimerQueue::new(),
            listener_log,
        }
    }

    /// Route a controller command into the timer queue.
    pub fn apply(&mut self, cmd: OverlayCmd) {
        match cmd {
            OverlayCmd::None => {}
            OverlayCmd::Schedule { token, after } => self.timers.schedule(token, after),
            OverlayCmd::Cancel(token) => self.timers.cancel(token),
            OverlayCmd::Batch(cmds) => {
                for c in cmds {
                    self.apply(c);
                }
            }
        }
    }

    /// Request an open and queue its settle timer.
    pub fn open(&mut self) {
        let cmd = self.overlay.request_open(&self.focus);
        self.apply(cmd);
    }

    /// Request a close for `reason` and queue its settle timer.
    pub fn close(&mut self, reason: DismissReason) {
        let cmd = self
            .overlay
            .request_close(reason, &self.tree, &mut self.focus);
        self.apply(cmd);
    }

    /// Fire the oldest pending timer into the controller. Returns the
    /// token fired, or `None` when nothing was pending.
    pub fn settle_next(&mut self) -> Option<SettleToken> {
        let token = self.timers.fire_next()?;
        self.overlay.settle(token, &self.tree, &mut self.focus);
        Some(token)
    }

    /// Fire timers until the queue drains.
    pub fn settle_all(&mut self) {
        while self.settle_next().is_some() {}
    }

    /// Deliver a document-level Escape press.
    pub fn press_escape(&mut self) {
        let cmd = self.overlay.handle_key(
            &KeyEvent::from(KeyCode::Escape),
            &self.tree,
            &mut self.focus,
        );
        self.apply(cmd);
    }

    /// Deliver a document-level Tab (or Shift+Tab) press.
    pub fn press_tab(&mut self, shift: bool) {
        let mods = if shift {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        let key = KeyEvent::new(KeyCode::Tab).with_modifiers(mods);
        let cmd = self.overlay.handle_key(&key, &self.tree, &mut self.focus);
        self.apply(cmd);
    }

    /// Deliver a pointer press on `target` (`None` models a press with
    /// no element under it).
    pub fn click(&mut self, target: Option<ElementId>) {
        let cmd = self
            .overlay
            .handle_pointer(&PointerEvent::new(target), &self.tree, &mut self.focus);
        self.apply(cmd);
    }

    /// Listener installs so far.
    #[must_use]
    pub fn installs(&self) -> usize {
        self.listener_log.borrow().installs
    }

    /// Listener removes so far.
    #[must_use]
    pub fn removes(&self) -> usize {
        self.listener_log.borrow().removes
    }
}

/// A tree with a trigger button (id 100) and an overlay container
/// (id 10) holding `children` focusable elements with ids `1..`.
#[must_use]
pub fn overlay_tree(children: usize) -> ElementTree {
    use weft_core::Element;
    let mut tree = ElementTree::new();
    tree.insert_root(Element::new(100));
    tree.insert_root(Element::new(10));
    for id in 1..=children as ElementId {
        tree.append(10, Element::new(id));
    }
    tree
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use weft_engine::OverlayState;

    fn sim() -> HostSim {
        HostSim::new(overlay_tree(2), 10, OverlayConfig::default())
    }

    #[test]
    fn open_queues_one_timer() {
        let mut h = sim();
        h.open();
        assert_eq!(h.overlay.state(), OverlayState::Opening);
        assert_eq!(h.timers.pending_count(), 1);
    }

    #[test]
    fn settle_next_drives_the_controller() {
        let mut h = sim();
        h.open();
        assert!(h.settle_next().is_some());
        assert_eq!(h.overlay.state(), OverlayState::Open);
        assert_eq!(h.installs(), 1);
    }

    #[test]
    fn batch_commands_are_applied_in_order() {
        let mut h = sim();
        h.open();
        // Close during Opening: Batch(Cancel(open), Schedule(close)).
        h.close(DismissReason::ProgrammaticClose);
        assert_eq!(h.timers.pending_count(), 1);
        h.settle_all();
        assert_eq!(h.overlay.state(), OverlayState::Closed);
    }

    #[test]
    fn durations_flow_from_config() {
        let cfg = OverlayConfig::new().with_open_settle(Duration::from_millis(5));
        let mut h = HostSim::new(overlay_tree(1), 10, cfg);
        h.open();
        assert_eq!(h.timers.pending_count(), 1);
    }
}
