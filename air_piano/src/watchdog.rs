//! "No hand detected" advisory timer.
//!
//! The first zero-hand detection arms a single deadline; any detection
//! with a hand cancels it and clears the advisory.  At most one deadline
//! is ever pending — re-arming while armed is a no-op, so a long empty
//! stretch fires once, `delay` after it began.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct NoSignalWatchdog {
    delay: Duration,
    deadline: Option<Instant>,
    tip_visible: bool,
}

impl NoSignalWatchdog {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

    pub fn new(delay: Duration) -> Self {
        NoSignalWatchdog { delay, deadline: None, tip_visible: false }
    }

    /// Feed one detection outcome.
    pub fn observe(&mut self, hand_count: usize, now: Instant) {
        if hand_count > 0 {
            self.deadline = None;
            self.tip_visible = false;
        } else if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Fire the advisory if the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if let Some(due) = self.deadline {
            if now >= due {
                self.tip_visible = true;
                self.deadline = None;
            }
        }
    }

    /// Whether the "no hand detected" tip should be shown.
    pub fn tip_visible(&self) -> bool {
        self.tip_visible
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and hide everything (gesture mode off, camera stopped).
    pub fn reset(&mut self) {
        self.deadline = None;
        self.tip_visible = false;
    }
}

impl Default for NoSignalWatchdog {
    fn default() -> Self {
        NoSignalWatchdog::new(Self::DEFAULT_DELAY)
    }
}
