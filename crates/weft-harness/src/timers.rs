#![forbid(unsafe_code)]

//! Manually-driven settle timers.
//!
//! The controller describes timer work as commands; this queue records
//! them and fires them only when a test asks, in scheduling order.
//! Cancellation removes the entry entirely, so a cancelled token can
//! never fire.

use std::collections::VecDeque;
use std::time::Duration;

use weft_engine::SettleToken;

/// FIFO of scheduled settle timers, fired by hand.
#[derive(Debug, Default)]
pub struct ManualTimerQueue {
    pending: VecDeque<(SettleToken, Duration)>,
}

impl ManualTimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scheduled timer.
    pub fn schedule(&mut self, token: SettleToken, after: Duration) {
        self.pending.push_back((token, after));
    }

    /// Remove a scheduled timer. Unknown tokens are ignored.
    pub fn cancel(&mut self, token: SettleToken) {
        self.pending.retain(|(t, _)| *t != token);
    }

    /// Pop and return the oldest pending timer's token, or `None` when
    /// the queue is empty.
    pub fn fire_next(&mut self) -> Option<SettleToken> {
        self.pending.pop_front().map(|(token, _)| token)
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

// =========================================================================
// Tests
// =========================================================================
