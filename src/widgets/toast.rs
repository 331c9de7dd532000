//! Toast: a status message that dismisses itself after a countdown.
//!
//! The countdown pauses while the pointer rests on the toast. Closing by hand
//! or by timer calls `on_close` exactly once.

use std::any::Any;
use std::time::Duration;

use crate::app::Ui;
use crate::context::ContextError;
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{EventResult, UiEvent};
use crate::primitives::AutoDismiss;
use crate::timer::TimerId;
use crate::widget::Component;

use super::{attach, Callback};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ToastConfig {
    pub message: String,
    /// Countdown; `None` uses [`UiConfig::toast_duration`](crate::app::UiConfig).
    /// Zero disables auto-dismiss.
    pub duration: Option<Duration>,
    pub on_close: Option<Callback>,
}

impl ToastConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

pub struct Toast {
    root: NodeId,
    close_button: NodeId,
    countdown: AutoDismiss,
    on_close: Option<Callback>,
}

impl Toast {
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: ToastConfig,
    ) -> Result<Self, ContextError> {
        let root = attach(
            &mut ui.document,
            parent,
            NodeData::new(Role::Status).with_label(config.message),
            "Toast",
        )?;
        let close_button = ui
            .document
            .append_child(root, NodeData::new(Role::Button).with_label("Close"))
            .ok_or(ContextError::DetachedParent { component: "Toast" })?;

        let mut countdown = AutoDismiss::new();
        let duration = config.duration.unwrap_or(ui.config.toast_duration);
        countdown.arm(duration, config.on_close.is_some(), &mut ui.timers);

        Ok(Self {
            root,
            close_button,
            countdown,
            on_close: config.on_close,
        })
    }

    pub fn close_button(&self) -> NodeId {
        self.close_button
    }

    pub fn is_open(&self) -> bool {
        !self.countdown.is_dismissed()
    }

    /// Counting down (or paused mid-countdown).
    pub fn is_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn is_paused(&self) -> bool {
        self.countdown.is_paused()
    }

    /// Dismiss now. Has no effect after the first dismissal.
    pub fn close(&mut self, ui: &mut Ui) {
        if self.countdown.dismiss(&mut ui.timers) {
            self.finish(ui);
        }
    }

    fn finish(&mut self, ui: &mut Ui) {
        ui.document.set_visible(self.root, false);
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
    }
}

impl Component for Toast {
    fn name(&self) -> &str {
        "Toast"
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        match *event {
            UiEvent::Click { target } if target == self.close_button => {
                self.close(ui);
                EventResult::Handled
            }
            UiEvent::PointerEnter { target } if target == self.root => {
                self.countdown.pause(&mut ui.timers);
                EventResult::Ignored
            }
            UiEvent::PointerLeave { target } if target == self.root => {
                self.countdown.resume(&mut ui.timers);
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_timer(&mut self, ui: &mut Ui, timer: TimerId) -> bool {
        if !self.countdown.on_timer(timer) {
            return false;
        }
        self.finish(ui);
        true
    }

    fn unmount(&mut self, ui: &mut Ui) {
        self.countdown.dispose(&mut ui.timers);
        ui.document.remove(self.root);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
