//! Drain coordination
//!
//! Serializes drain passes: at most one pass runs at a time, and flush
//! requests arriving while a pass is running coalesce into exactly one
//! follow-up pass. Draining is idempotent (a pass that finds the queue
//! empty is a correct no-op), so collapsing N redundant requests into one
//! follow-up loses no data.
//!
//! The coordinator is a plain two-state machine:
//!
//! ```text
//!            try_begin() == true
//!   [idle] ----------------------> [running]
//!     ^                                |  try_begin() == false, pending = true
//!     |   finish() == false            |
//!     +--------------------------------+
//!              finish() == true (pending consumed, run another pass)
//! ```
//!
//! Callers never poll: `try_begin`/`finish` decide everything, and
//! `wait_idle` exists only for shutdown and tests.

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct DrainState {
    running: bool,
    pending: bool,
}

/// Mutual-exclusion gate for drain passes with request coalescing
#[derive(Debug, Default)]
pub struct DrainCoordinator {
    state: Mutex<DrainState>,
    idle: Notify,
}

impl DrainCoordinator {
    /// Create an idle coordinator
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a drain pass
    ///
    /// Returns `true` if the caller now owns the running slot and must
    /// run a pass (and eventually call [`finish`](Self::finish)).
    /// Returns `false` if a pass is already running; the request is
    /// recorded and at most one follow-up pass will run after the
    /// current one, no matter how many redundant requests arrive.
    pub fn try_begin(&self) -> bool {
        let mut state = self.state.lock();
        if state.running {
            state.pending = true;
            false
        } else {
            state.running = true;
            true
        }
    }

    /// Signal that the current pass completed
    ///
    /// Must be called exactly once per pass, including failed ones; an
    /// owner that skips it would block every future flush. Returns `true`
    /// if a request accumulated meanwhile - the caller keeps the running
    /// slot and must run one more pass. Returns `false` once the
    /// coordinator is idle again.
    pub fn finish(&self) -> bool {
        let mut state = self.state.lock();
        debug_assert!(state.running, "finish() without a running pass");
        if state.pending {
            state.pending = false;
            true
        } else {
            state.running = false;
            drop(state);
            self.idle.notify_waiters();
            false
        }
    }

    /// Whether no pass is currently running
    pub fn is_idle(&self) -> bool {
        !self.state.lock().running
    }

    /// Wait until the coordinator is idle
    ///
    /// Quiescence point for shutdown: once this returns, every pass that
    /// was running or pending at call time has completed.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;
