//! Fixed-interval reload timer.
//!
//! Prompts block, so nothing refreshes while one is open. The session loop
//! calls `catch_up()` whenever a prompt closes; while an action's modals are
//! open the timer is held and a reload that came due fires right after.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    next_due: Instant,
    held: bool,
}

impl Poller {
    /// Start a timer whose first tick is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            held: false,
        }
    }

    /// Whether a reload should run now
    pub fn due(&self, now: Instant) -> bool {
        !self.held && now >= self.next_due
    }

    /// A reload just ran; schedule the next one
    pub fn mark(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Reschedule and report true when a reload is due
    pub fn catch_up(&mut self, now: Instant) -> bool {
        if self.due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }

    /// Time left until the next tick (zero when overdue)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// A modal opened
    pub fn hold(&mut self) {
        self.held = true;
    }

    /// The modal closed
    pub fn release(&mut self) {
        self.held = false;
    }
}
