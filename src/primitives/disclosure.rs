//! Delayed show/hide for hover- and focus-driven disclosure (tooltips).
//!
//! ```text
//! Hidden --enter--> Scheduled --delay--> Visible --leave--> Hidden
//!                       |                                     ^
//!                       +--------------leave------------------+
//! ```
//!
//! Logical visibility flips to hidden the moment the pointer leaves. A
//! separate "rendered" flag stays up for the exit window so an animation can
//! finish before the node is hidden.

use std::time::Duration;

use tracing::debug;

use crate::timer::{Scheduler, TimerId};

/// Logical phase of a disclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisclosurePhase {
    #[default]
    Hidden,
    Scheduled,
    Visible,
}

/// Snapshot of a disclosure for queries and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisclosureState {
    pub is_scheduled: bool,
    pub is_visible: bool,
    /// Still mounted for the exit animation (or visible).
    pub is_rendered: bool,
    /// The pending show timer.
    pub timer: Option<TimerId>,
}

/// Show-after-delay state machine with one pending show timer at most.
#[derive(Debug)]
pub struct DelayedDisclosure {
    delay: Duration,
    exit: Duration,
    phase: DisclosurePhase,
    show_timer: Option<TimerId>,
    exit_timer: Option<TimerId>,
    rendered: bool,
    disposed: bool,
}

impl DelayedDisclosure {
    /// `delay` before showing, `exit` window kept rendered after hiding.
    pub fn new(delay: Duration, exit: Duration) -> Self {
        Self {
            delay,
            exit,
            phase: DisclosurePhase::Hidden,
            show_timer: None,
            exit_timer: None,
            rendered: false,
            disposed: false,
        }
    }

    /// Pointer entered or trigger focused.
    ///
    /// No-op while already scheduled or visible, so repeated enter events
    /// never stack timers.
    pub fn on_enter(&mut self, timers: &mut Scheduler) {
        if self.disposed || self.phase != DisclosurePhase::Hidden {
            return;
        }
        timers.cancel_slot(&mut self.show_timer);
        self.show_timer = Some(timers.schedule(self.delay, "disclosure.show"));
        self.phase = DisclosurePhase::Scheduled;
        debug!(delay = ?self.delay, "disclosure scheduled");
    }

    /// Pointer left or trigger blurred. Cancels a pending show; hides a
    /// visible disclosure immediately.
    pub fn on_leave(&mut self, timers: &mut Scheduler) {
        timers.cancel_slot(&mut self.show_timer);
        match self.phase {
            DisclosurePhase::Hidden => {}
            DisclosurePhase::Scheduled => {
                self.phase = DisclosurePhase::Hidden;
                debug!("disclosure cancelled before showing");
            }
            DisclosurePhase::Visible => {
                self.phase = DisclosurePhase::Hidden;
                timers.cancel_slot(&mut self.exit_timer);
                if self.exit.is_zero() {
                    self.rendered = false;
                } else {
                    self.exit_timer = Some(timers.schedule(self.exit, "disclosure.exit"));
                }
                debug!("disclosure hidden");
            }
        }
    }

    /// Feed a fired timer. Returns `true` if it belonged to this disclosure.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut Scheduler) -> bool {
        if self.show_timer == Some(id) {
            self.show_timer = None;
            self.phase = DisclosurePhase::Visible;
            self.rendered = true;
            timers.cancel_slot(&mut self.exit_timer);
            debug!("disclosure visible");
            true
        } else if self.exit_timer == Some(id) {
            self.exit_timer = None;
            if self.phase != DisclosurePhase::Visible {
                self.rendered = false;
            }
            true
        } else {
            false
        }
    }

    /// Cancel every outstanding timer and hide for good. Idempotent.
    pub fn dispose(&mut self, timers: &mut Scheduler) {
        if self.disposed {
            return;
        }
        timers.cancel_slot(&mut self.show_timer);
        timers.cancel_slot(&mut self.exit_timer);
        self.phase = DisclosurePhase::Hidden;
        self.rendered = false;
        self.disposed = true;
    }

    pub fn phase(&self) -> DisclosurePhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == DisclosurePhase::Visible
    }

    pub fn is_scheduled(&self) -> bool {
        self.phase == DisclosurePhase::Scheduled
    }

    /// Visible, or hidden but still inside the exit window.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DisclosureState {
        DisclosureState {
            is_scheduled: self.is_scheduled(),
            is_visible: self.is_visible(),
            is_rendered: self.rendered,
            timer: self.show_timer,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
