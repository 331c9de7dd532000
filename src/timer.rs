//! Cancellable single-shot timers on a monotonic virtual clock.
//!
//! [`Scheduler`] never sleeps. Time only moves when the owner calls
//! [`Scheduler::advance`] or pops expired timers, which keeps every delay in
//! the primitives deterministic under test. [`crate::app::Ui::next_timer`]
//! drives it from real time with tokio.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Handle to a scheduled timer. Stale after it fires or is cancelled.
    pub struct TimerId;
}

#[derive(Debug, Clone)]
struct Timer {
    deadline: Duration,
    /// Insertion sequence, breaks ties between equal deadlines.
    seq: u64,
    label: &'static str,
}

/// Timer queue owned by the event loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    timers: SlotMap<TimerId, Timer>,
}

impl Scheduler {
    /// Create a scheduler at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timer to fire `delay` from now. `label` only shows up in logs.
    pub fn schedule(&mut self, delay: Duration, label: &'static str) -> TimerId {
        let deadline = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(Timer {
            deadline,
            seq,
            label,
        });
        trace!(?id, label, ?deadline, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(id) {
            Some(timer) => {
                trace!(?id, label = timer.label, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel the timer held in `slot`, if any, leaving `None` behind.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    /// Whether the timer is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Time remaining until the timer fires, if still pending.
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.timers
            .get(id)
            .map(|t| t.deadline.saturating_sub(self.now))
    }

    /// Number of pending timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.earliest().map(|(_, t)| t.deadline)
    }

    /// Pop the earliest timer whose deadline is at or before `until`,
    /// moving the clock to its deadline.
    ///
    /// Firing one timer at a time lets handlers schedule follow-ups that
    /// still land inside the same window.
    pub fn pop_expired(&mut self, until: Duration) -> Option<TimerId> {
        let (id, deadline) = self
            .earliest()
            .filter(|(_, t)| t.deadline <= until)
            .map(|(id, t)| (id, t.deadline))?;
        self.timers.remove(id);
        if deadline > self.now {
            self.now = deadline;
        }
        trace!(?id, now = ?self.now, "timer fired");
        Some(id)
    }

    /// Advance the clock by `by` and return every timer that expired, in
    /// firing order.
    ///
    /// Timers scheduled by the caller while handling the returned ids are not
    /// included; use [`pop_expired`](Self::pop_expired) for that.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(id) = self.pop_expired(until) {
            fired.push(id);
        }
        self.now = until;
        fired
    }

    /// Move the clock to `until` without firing anything. No-op if `until`
    /// is in the past.
    pub fn set_now(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    fn earliest(&self) -> Option<(TimerId, &Timer)> {
        self.timers
            .iter()
            .min_by_key(|(_, t)| (t.deadline, t.seq))
    }
}
