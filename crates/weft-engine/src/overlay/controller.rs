#![forbid(unsafe_code)]

//! Dismissible overlay state machine.
//!
//! An overlay moves through `Closed -> Opening -> Open -> Closing ->
//! Closed`. The transition phases exist so hosts can run enter/exit
//! animations; the controller never sleeps itself. Instead every method
//! that starts a transition returns an [`OverlayCmd`] describing the
//! timer work the host must perform, and the host calls
//! [`OverlayController::settle`] back when a scheduled timer fires.
//! Stale tokens (from cancelled transitions) are ignored.
//!
//! Invariants:
//! - Document listeners are installed only in `Open` and are removed by
//!   the time the overlay leaves `Open`, on every close path.
//! - The focus trap is armed only while `Open`; closing restores focus
//!   to the element that held it when the open was *requested*.
//! - A close requested during `Opening` cancels the pending open settle;
//!   listeners and trap are never touched on that path.
//!
//! Failure modes: requests that are illegal in the current state
//! (opening an open overlay, closing a closed one, settling a stale
//! token) are silent no-ops returning [`OverlayCmd::None`].

use std::fmt;
use std::time::Duration;

use tracing::debug;
use weft_core::{ElementId, ElementTree, FocusContext, KeyCode, KeyEvent, Notifier, PointerEvent};

use crate::focus::TrapState;

use super::listeners::{DocumentListeners, ListenerSet};

/// Lifecycle phase of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    /// Not shown; no resources held.
    #[default]
    Closed,
    /// Enter transition running; not yet interactive.
    Opening,
    /// Fully shown and interactive; listeners installed, trap armed.
    Open,
    /// Exit transition running; already non-interactive.
    Closing,
}

/// Why an overlay was asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// An in-overlay affordance (close button, cancel).
    UserDismiss,
    /// The owning application closed it.
    ProgrammaticClose,
    /// Document-level Escape.
    EscapeKey,
    /// Pointer press outside the overlay container.
    OutsideClick,
}

/// Identifies one scheduled settle timer.
///
/// Tokens are never reused within a controller; a token from a cancelled
/// transition stays stale forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleToken(u64);

/// Timer work the host must perform after a controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCmd {
    /// Nothing to do.
    None,
    /// Start a timer; call [`OverlayController::settle`] with `token`
    /// after `after` elapses.
    Schedule { token: SettleToken, after: Duration },
    /// Discard the timer previously scheduled under `token`.
    Cancel(SettleToken),
    /// Perform several commands, in order.
    Batch(Vec<OverlayCmd>),
}

impl OverlayCmd {
    /// Combine commands, dropping `None`s and collapsing singletons.
    #[must_use]
    pub fn batch(cmds: impl IntoIterator<Item = OverlayCmd>) -> Self {
        let mut out: Vec<OverlayCmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, OverlayCmd::None))
            .collect();
        match out.len() {
            0 => OverlayCmd::None,
            1 => out.remove(0),
            _ => OverlayCmd::Batch(out),
        }
    }

    /// Whether this command carries no work.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, OverlayCmd::None)
    }
}

/// Tunables for a dismissible overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    close_on_escape: bool,
    close_on_outside: bool,
    open_settle: Duration,
    close_settle: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_outside: true,
            open_settle: Duration::from_millis(150),
            close_settle: Duration::from_millis(100),
        }
    }
}

impl OverlayConfig {
    /// Default configuration: both dismiss channels enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Escape-to-dismiss.
    #[must_use]
    pub fn with_close_on_escape(mut self, on: bool) -> Self {
        self.close_on_escape = on;
        self
    }

    /// Enable or disable outside-click dismissal.
    #[must_use]
    pub fn with_close_on_outside(mut self, on: bool) -> Self {
        self.close_on_outside = on;
        self
    }

    /// Duration of the enter transition.
    #[must_use]
    pub fn with_open_settle(mut self, after: Duration) -> Self {
        self.open_settle = after;
        self
    }

    /// Duration of the exit transition.
    #[must_use]
    pub fn with_close_settle(mut self, after: Duration) -> Self {
        self.close_settle = after;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Open,
    Close,
}

/// Drives one overlay's lifecycle, dismissal channels, and focus trap.
pub struct OverlayController {
    config: OverlayConfig,
    state: OverlayState,
    container: ElementId,
    listeners: ListenerSet,
    trap: Option<TrapState>,
    trigger_focus: Option<ElementId>,
    pending: Option<(SettleToken, Pending)>,
    next_token: u64,
    on_state_change: Notifier<OverlayState>,
    on_dismiss: Notifier<DismissReason>,
}

impl OverlayController {
    /// Create a controller for the overlay rooted at `container`.
    ///
    /// `hooks` are the host's document-listener hooks; headless callers
    /// pass [`super::NullListeners`].
    pub fn new(
        container: ElementId,
        config: OverlayConfig,
        hooks: Box<dyn DocumentListeners>,
    ) -> Self {
        Self {
            config,
            state: OverlayState::Closed,
            container,
            listeners: ListenerSet::new(hooks),
            trap: None,
            trigger_focus: None,
            pending: None,
            next_token: 0,
            on_state_change: Notifier::new(),
            on_dismiss: Notifier::new(),
        }
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether the overlay is fully open and interactive.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// The container element this overlay presents.
    #[must_use]
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Whether document listeners are currently installed.
    #[must_use]
    pub fn listeners_installed(&self) -> bool {
        self.listeners.is_installed()
    }

    /// Channel notified after every state transition.
    #[must_use]
    pub fn on_state_change(&self) -> &Notifier<OverlayState> {
        &self.on_state_change
    }

    /// Channel notified once per dismissal, when the close begins.
    #[must_use]
    pub fn on_dismiss(&self) -> &Notifier<DismissReason> {
        &self.on_dismiss
    }

    fn alloc_token(&mut self) -> SettleToken {
        let token = SettleToken(self.next_token);
        self.next_token += 1;
        token
    }

    fn transition(&mut self, to: OverlayState) {
        debug!(from = ?self.state, ?to, container = self.container, "overlay transition");
        self.state = to;
        self.on_state_change.emit(&to);
    }

    /// Begin opening. Captures the trigger's focus owner for later
    /// restoration and schedules the enter settle. No-op unless `Closed`.
    #[must_use = "the returned command carries the settle timer to schedule"]
    pub fn request_open(&mut self, focus: &FocusContext) -> OverlayCmd {
        if self.state != OverlayState::Closed {
            return OverlayCmd::None;
        }
        self.trigger_focus = focus.current();
        self.transition(OverlayState::Opening);
        let token = self.alloc_token();
        self.pending = Some((token, Pending::Open));
        OverlayCmd::Schedule {
            token,
            after: self.config.open_settle,
        }
    }

    /// Begin closing for `reason`.
    ///
    /// From `Open`: listeners are removed and the trap disarmed *now*,
    /// before the exit transition runs. From `Opening`: the pending open
    /// settle is cancelled and the overlay goes straight into its exit
    /// transition; listeners were never installed and stay that way.
    /// No-op from `Closing` and `Closed`.
    #[must_use = "the returned command carries the timer work to perform"]
    pub fn request_close(
        &mut self,
        reason: DismissReason,
        tree: &ElementTree,
        focus: &mut FocusContext,
    ) -> OverlayCmd {
        match self.state {
            OverlayState::Open => {
                self.listeners.release();
                if let Some(mut trap) = self.trap.take() {
                    trap.disarm(tree, focus);
                }
                self.trigger_focus = None;
                self.transition(OverlayState::Closing);
                self.on_dismiss.emit(&reason);
                let token = self.alloc_token();
                self.pending = Some((token, Pending::Close));
                OverlayCmd::Schedule {
                    token,
                    after: self.config.close_settle,
                }
            }
            OverlayState::Opening => {
                let cancel = self
                    .pending
                    .take()
                    .map_or(OverlayCmd::None, |(token, _)| OverlayCmd::Cancel(token));
                self.trigger_focus = None;
                self.transition(OverlayState::Closing);
                self.on_dismiss.emit(&reason);
                let token = self.alloc_token();
                self.pending = Some((token, Pending::Close));
                OverlayCmd::batch([
                    cancel,
                    OverlayCmd::Schedule {
                        token,
                        after: self.config.close_settle,
                    },
                ])
            }
            OverlayState::Closing | OverlayState::Closed => OverlayCmd::None,
        }
    }

    /// Complete the transition scheduled under `token`.
    ///
    /// Finishing an open installs listeners and arms the focus trap;
    /// finishing a close lands in `Closed`. Tokens that no longer match
    /// the pending transition are stale and ignored.
    pub fn settle(&mut self, token: SettleToken, tree: &ElementTree, focus: &mut FocusContext) {
        let Some((pending_token, kind)) = self.pending else {
            debug!(?token, "settle with nothing pending ignored");
            return;
        };
        if token != pending_token {
            debug!(?token, expected = ?pending_token, "stale settle token ignored");
            return;
        }
        self.pending = None;
        match kind {
            Pending::Open => {
                self.listeners.acquire();
                self.trap = Some(TrapState::arm_returning_to(
                    tree,
                    focus,
                    self.container,
                    self.trigger_focus,
                ));
                self.transition(OverlayState::Open);
            }
            Pending::Close => {
                self.transition(OverlayState::Closed);
            }
        }
    }

    /// Open if closed, otherwise request a user dismissal.
    #[must_use = "the returned command carries the timer work to perform"]
    pub fn toggle(&mut self, tree: &ElementTree, focus: &mut FocusContext) -> OverlayCmd {
        match self.state {
            OverlayState::Closed => self.request_open(focus),
            OverlayState::Open | OverlayState::Opening => {
                self.request_close(DismissReason::UserDismiss, tree, focus)
            }
            OverlayState::Closing => OverlayCmd::None,
        }
    }

    /// Route a document-level key press.
    ///
    /// Escape dismisses when enabled; Tab and Shift+Tab are wrapped by
    /// the armed trap. Everything else passes through. Only an `Open`
    /// overlay reacts at all.
    #[must_use = "the returned command carries the timer work to perform"]
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        tree: &ElementTree,
        focus: &mut FocusContext,
    ) -> OverlayCmd {
        if self.state != OverlayState::Open {
            return OverlayCmd::None;
        }
        match event.code {
            KeyCode::Escape if self.config.close_on_escape => {
                self.request_close(DismissReason::EscapeKey, tree, focus)
            }
            KeyCode::Tab => {
                if let Some(trap) = &self.trap
                    && let Some(target) = trap.handle_tab(tree, focus, event.shift())
                {
                    focus.set(target, tree);
                }
                OverlayCmd::None
            }
            _ => OverlayCmd::None,
        }
    }

    /// Route a document-level pointer press.
    ///
    /// Presses landing outside the overlay container dismiss when
    /// enabled. Presses inside (or on the container itself) never do.
    #[must_use = "the returned command carries the timer work to perform"]
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        tree: &ElementTree,
        focus: &mut FocusContext,
    ) -> OverlayCmd {
        if self.state != OverlayState::Open || !self.config.close_on_outside {
            return OverlayCmd::None;
        }
        let outside = match event.target {
            Some(target) => !tree.is_within(target, self.container),
            None => true,
        };
        if outside {
            self.request_close(DismissReason::OutsideClick, tree, focus)
        } else {
            OverlayCmd::None
        }
    }

    /// Tear down immediately, skipping the exit transition.
    ///
    /// Releases listeners, disarms the trap, discards any pending settle
    /// and lands in `Closed`. Emits a `ProgrammaticClose` dismissal if
    /// the overlay was not already closed.
    #[must_use = "the returned command cancels any outstanding timer"]
    pub fn shutdown(&mut self, tree: &ElementTree, focus: &mut FocusContext) -> OverlayCmd {
        let cancel = self
            .pending
            .take()
            .map_or(OverlayCmd::None, |(token, _)| OverlayCmd::Cancel(token));
        self.listeners.release();
        if let Some(mut trap) = self.trap.take() {
            trap.disarm(tree, focus);
        }
        self.trigger_focus = None;
        if self.state != OverlayState::Closed {
            self.transition(OverlayState::Closed);
            self.on_dismiss.emit(&DismissReason::ProgrammaticClose);
        }
        cancel
    }
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("state", &self.state)
            .field("container", &self.container)
            .field("listeners", &self.listeners)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::super::listeners::NullListeners;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use weft_core::{Element, Modifiers, PointerButton};

    fn tree() -> ElementTree {
        // 100 trigger outside; 10 overlay container with children 1, 2.
        let mut t = ElementTree::new();
        t.insert_root(Element::new(100));
        t.insert_root(Element::new(10));
        t.append(10, Element::new(1));
        t.append(10, Element::new(2));
        t
    }

    fn controller() -> OverlayController {
        OverlayController::new(10, OverlayConfig::default(), Box::new(NullListeners))
    }

    /// Extract the single scheduled token from a command.
    fn scheduled(cmd: &OverlayCmd) -> Option<SettleToken> {
        match cmd {
            OverlayCmd::Schedule { token, .. } => Some(*token),
            OverlayCmd::Batch(cmds) => cmds.iter().find_map(scheduled),
            _ => None,
        }
    }

    fn cancelled(cmd: &OverlayCmd) -> Option<SettleToken> {
        match cmd {
            OverlayCmd::Cancel(token) => Some(*token),
            OverlayCmd::Batch(cmds) => cmds.iter().find_map(cancelled),
            _ => None,
        }
    }

    fn open(ctl: &mut OverlayController, t: &ElementTree, fc: &mut FocusContext) {
        let cmd = ctl.request_open(fc);
        let token = scheduled(&cmd).unwrap();
        ctl.settle(token, t, fc);
        assert_eq!(ctl.state(), OverlayState::Open);
    }

    // --- Command batching ---

    #[test]
    fn batch_collapses() {
        assert_eq!(OverlayCmd::batch([]), OverlayCmd::None);
        assert_eq!(
            OverlayCmd::batch([OverlayCmd::None, OverlayCmd::None]),
            OverlayCmd::None
        );
        let c = OverlayCmd::Cancel(SettleToken(7));
        assert_eq!(OverlayCmd::batch([OverlayCmd::None, c.clone()]), c);
    }

    // --- Happy path ---

    #[test]
    fn open_settle_close_settle_round_trip() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        assert_eq!(ctl.state(), OverlayState::Closed);

        let cmd = ctl.request_open(&fc);
        assert_eq!(ctl.state(), OverlayState::Opening);
        assert!(!ctl.listeners_installed());
        let token = scheduled(&cmd).unwrap();

        ctl.settle(token, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Open);
        assert!(ctl.listeners_installed());
        assert_eq!(fc.current(), Some(1));

        let cmd = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closing);
        assert!(!ctl.listeners_installed());
        let token = scheduled(&cmd).unwrap();

        ctl.settle(token, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closed);
    }

    #[test]
    fn close_restores_trigger_focus() {
        let t = tree();
        let mut fc = FocusContext::new();
        fc.set(100, &t);
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        assert_eq!(fc.current(), Some(1));

        let _ = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        assert_eq!(fc.current(), Some(100));
    }

    #[test]
    fn restore_target_is_captured_at_request_time() {
        let t = tree();
        let mut fc = FocusContext::new();
        fc.set(100, &t);
        let mut ctl = controller();
        let cmd = ctl.request_open(&fc);
        // Focus wanders during the enter transition.
        fc.set(2, &t);
        ctl.settle(scheduled(&cmd).unwrap(), &t, &mut fc);
        let _ = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        assert_eq!(fc.current(), Some(100));
    }

    // --- Illegal requests ---

    #[test]
    fn open_while_not_closed_is_noop() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let _ = ctl.request_open(&fc);
        assert!(ctl.request_open(&fc).is_none());
        let token = {
            let cmd = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
            scheduled(&cmd).unwrap()
        };
        assert!(ctl.request_open(&fc).is_none()); // Closing
        ctl.settle(token, &t, &mut fc);
        assert!(!ctl.request_open(&fc).is_none()); // Closed again
    }

    #[test]
    fn close_while_closed_is_noop() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let states: Rc<RefCell<Vec<OverlayState>>> = Rc::default();
        let sink = Rc::clone(&states);
        let _sub = ctl
            .on_state_change()
            .subscribe(move |s| sink.borrow_mut().push(*s));
        assert!(
            ctl.request_close(DismissReason::ProgrammaticClose, &t, &mut fc)
                .is_none()
        );
        assert!(states.borrow().is_empty());
    }

    // --- Close during Opening ---

    #[test]
    fn close_during_opening_cancels_and_skips_listeners() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let open_cmd = ctl.request_open(&fc);
        let open_token = scheduled(&open_cmd).unwrap();

        let close_cmd = ctl.request_close(DismissReason::ProgrammaticClose, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closing);
        assert_eq!(cancelled(&close_cmd), Some(open_token));
        let close_token = scheduled(&close_cmd).unwrap();

        // The open settle arrives late anyway: stale, ignored.
        ctl.settle(open_token, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closing);
        assert!(!ctl.listeners_installed());

        ctl.settle(close_token, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert!(!ctl.listeners_installed());
    }

    #[test]
    fn stale_token_after_settle_is_ignored() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let cmd = ctl.request_open(&fc);
        let token = scheduled(&cmd).unwrap();
        ctl.settle(token, &t, &mut fc);
        let before = ctl.state();
        ctl.settle(token, &t, &mut fc);
        assert_eq!(ctl.state(), before);
    }

    // --- Dismiss channels ---

    #[test]
    fn escape_dismisses_open_overlay() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let reasons: Rc<RefCell<Vec<DismissReason>>> = Rc::default();
        let sink = Rc::clone(&reasons);
        let _sub = ctl
            .on_dismiss()
            .subscribe(move |r| sink.borrow_mut().push(*r));

        let cmd = ctl.handle_key(&KeyEvent::from(KeyCode::Escape), &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closing);
        assert!(scheduled(&cmd).is_some());
        assert_eq!(&*reasons.borrow(), &[DismissReason::EscapeKey]);
    }

    #[test]
    fn escape_disabled_is_ignored() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = OverlayController::new(
            10,
            OverlayConfig::new().with_close_on_escape(false),
            Box::new(NullListeners),
        );
        open(&mut ctl, &t, &mut fc);
        assert!(
            ctl.handle_key(&KeyEvent::from(KeyCode::Escape), &t, &mut fc)
                .is_none()
        );
        assert_eq!(ctl.state(), OverlayState::Open);
    }

    #[test]
    fn escape_while_not_open_is_ignored() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let _ = ctl.request_open(&fc); // Opening
        assert!(
            ctl.handle_key(&KeyEvent::from(KeyCode::Escape), &t, &mut fc)
                .is_none()
        );
        assert_eq!(ctl.state(), OverlayState::Opening);
    }

    #[test]
    fn outside_click_dismisses() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let cmd = ctl.handle_pointer(&PointerEvent::new(Some(100)), &t, &mut fc);
        assert!(scheduled(&cmd).is_some());
        assert_eq!(ctl.state(), OverlayState::Closing);
    }

    #[test]
    fn inside_click_does_not_dismiss() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        for target in [Some(10), Some(1), Some(2)] {
            assert!(
                ctl.handle_pointer(&PointerEvent::new(target), &t, &mut fc)
                    .is_none()
            );
        }
        assert_eq!(ctl.state(), OverlayState::Open);
    }

    #[test]
    fn targetless_click_counts_as_outside() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let cmd = ctl.handle_pointer(&PointerEvent::new(None), &t, &mut fc);
        assert!(scheduled(&cmd).is_some());
    }

    #[test]
    fn outside_click_disabled_is_ignored() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = OverlayController::new(
            10,
            OverlayConfig::new().with_close_on_outside(false),
            Box::new(NullListeners),
        );
        open(&mut ctl, &t, &mut fc);
        let click = PointerEvent::new(Some(100)).with_button(PointerButton::Primary);
        assert!(ctl.handle_pointer(&click, &t, &mut fc).is_none());
        assert_eq!(ctl.state(), OverlayState::Open);
    }

    // --- Tab trapping while open ---

    #[test]
    fn tab_wraps_inside_open_overlay() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        fc.set(2, &t);
        let cmd = ctl.handle_key(&KeyEvent::from(KeyCode::Tab), &t, &mut fc);
        assert!(cmd.is_none());
        assert_eq!(fc.current(), Some(1));

        let shift_tab = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        let _ = ctl.handle_key(&shift_tab, &t, &mut fc);
        assert_eq!(fc.current(), Some(2));
    }

    // --- Toggle ---

    #[test]
    fn toggle_cycles_open_and_closed() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let cmd = ctl.toggle(&t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Opening);
        ctl.settle(scheduled(&cmd).unwrap(), &t, &mut fc);

        let cmd = ctl.toggle(&t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closing);
        ctl.settle(scheduled(&cmd).unwrap(), &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closed);
    }

    #[test]
    fn toggle_during_closing_is_noop() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let _ = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        assert!(ctl.toggle(&t, &mut fc).is_none());
    }

    // --- Shutdown ---

    #[test]
    fn shutdown_from_open_releases_everything() {
        let t = tree();
        let mut fc = FocusContext::new();
        fc.set(100, &t);
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let cmd = ctl.shutdown(&t, &mut fc);
        assert!(cmd.is_none());
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert!(!ctl.listeners_installed());
        assert_eq!(fc.current(), Some(100));
    }

    #[test]
    fn shutdown_from_opening_cancels_pending() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let cmd = ctl.request_open(&fc);
        let token = scheduled(&cmd).unwrap();
        let cancel = ctl.shutdown(&t, &mut fc);
        assert_eq!(cancelled(&cancel), Some(token));
        assert_eq!(ctl.state(), OverlayState::Closed);
        // Late timer fire is stale.
        ctl.settle(token, &t, &mut fc);
        assert_eq!(ctl.state(), OverlayState::Closed);
    }

    #[test]
    fn shutdown_when_closed_is_silent() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let reasons: Rc<RefCell<Vec<DismissReason>>> = Rc::default();
        let sink = Rc::clone(&reasons);
        let _sub = ctl
            .on_dismiss()
            .subscribe(move |r| sink.borrow_mut().push(*r));
        let _ = ctl.shutdown(&t, &mut fc);
        assert!(reasons.borrow().is_empty());
    }

    // --- Observer ordering ---

    #[test]
    fn state_change_precedes_dismiss_on_close() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        open(&mut ctl, &t, &mut fc);
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let s = Rc::clone(&log);
        let _a = ctl
            .on_state_change()
            .subscribe(move |_| s.borrow_mut().push("state"));
        let d = Rc::clone(&log);
        let _b = ctl
            .on_dismiss()
            .subscribe(move |_| d.borrow_mut().push("dismiss"));
        let _ = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        assert_eq!(&*log.borrow(), &["state", "dismiss"]);
    }

    #[test]
    fn state_change_emitted_per_transition() {
        let t = tree();
        let mut fc = FocusContext::new();
        let mut ctl = controller();
        let states: Rc<RefCell<Vec<OverlayState>>> = Rc::default();
        let sink = Rc::clone(&states);
        let _sub = ctl
            .on_state_change()
            .subscribe(move |s| sink.borrow_mut().push(*s));

        let cmd = ctl.request_open(&fc);
        ctl.settle(scheduled(&cmd).unwrap(), &t, &mut fc);
        let cmd = ctl.request_close(DismissReason::UserDismiss, &t, &mut fc);
        ctl.settle(scheduled(&cmd).unwrap(), &t, &mut fc);

        assert_eq!(
            &*states.borrow(),
            &[
                OverlayState::Opening,
                OverlayState::Open,
                OverlayState::Closing,
                OverlayState::Closed,
            ]
        );
    }
}
