//! Single-shot auto-dismiss countdown (toasts).
//!
//! The countdown only arms when there is both a positive duration and someone
//! to notify. It reports the dismissal exactly once, whether it came from the
//! timer or from a manual close.

use std::time::Duration;

use tracing::debug;

use crate::timer::{Scheduler, TimerId};

#[derive(Debug, Default)]
pub struct AutoDismiss {
    timer: Option<TimerId>,
    /// Time left while paused.
    paused: Option<Duration>,
    dismissed: bool,
}

impl AutoDismiss {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the countdown. Returns whether a timer was scheduled.
    ///
    /// Nothing is scheduled for a zero duration, without a callback, or when
    /// already armed or dismissed.
    pub fn arm(&mut self, duration: Duration, has_callback: bool, timers: &mut Scheduler) -> bool {
        if duration.is_zero() || !has_callback || self.dismissed || self.is_armed() {
            return false;
        }
        self.timer = Some(timers.schedule(duration, "toast.dismiss"));
        debug!(?duration, "auto-dismiss armed");
        true
    }

    /// Feed a fired timer. Returns `true` when the owner must run its
    /// dismiss callback now.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.finish()
    }

    /// Close by hand. Cancels the countdown. Returns `true` when the owner
    /// must run its dismiss callback (first dismissal only).
    pub fn dismiss(&mut self, timers: &mut Scheduler) -> bool {
        timers.cancel_slot(&mut self.timer);
        self.paused = None;
        self.finish()
    }

    /// Stop the clock, keeping the time left.
    pub fn pause(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            self.paused = timers.remaining(id);
            timers.cancel(id);
        }
    }

    /// Continue a paused countdown with the time that was left.
    pub fn resume(&mut self, timers: &mut Scheduler) {
        if let Some(left) = self.paused.take() {
            if !self.dismissed {
                self.timer = Some(timers.schedule(left, "toast.dismiss"));
            }
        }
    }

    /// Cancel without reporting a dismissal. Idempotent.
    pub fn dispose(&mut self, timers: &mut Scheduler) {
        timers.cancel_slot(&mut self.timer);
        self.paused = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some() || self.paused.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    fn finish(&mut self) -> bool {
        if self.dismissed {
            return false;
        }
        self.dismissed = true;
        debug!("dismissed");
        true
    }
}
