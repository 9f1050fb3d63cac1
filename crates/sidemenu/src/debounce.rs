//! Debounced resize notifications.
//!
//! Collapsing or expanding the sidebar changes the layout width, and hosts
//! want one resize notification after the user stops toggling. The debouncer
//! does not own a timer: callers pass the current [`Instant`] to
//! [`ResizeDebouncer::trigger`] and [`ResizeDebouncer::poll`].

use std::time::{Duration, Instant};

/// Default quiet period before a resize fires.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(600);

/// Collapses bursts of triggers into a single firing.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule a firing `window` after `now`, replacing any pending one.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns true exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}
