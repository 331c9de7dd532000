//! Ui context, configuration, and the component host.
//!
//! [`Ui`] bundles what every primitive needs: the shared [`Document`], the
//! timer [`Scheduler`], and [`UiConfig`] defaults. [`App`] owns a `Ui` plus
//! the mounted components and routes events and fired timers to them.

use std::time::Duration;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::document::Document;
use crate::dom::NodeId;
use crate::event::{EventResult, UiEvent};
use crate::timer::{Scheduler, TimerId};
use crate::widget::{Component, ComponentId, LifecycleTracker};

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Defaults shared by every widget mounted into a [`Ui`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Hover/focus delay before a tooltip shows.
    pub tooltip_delay: Duration,
    /// How long hidden overlays stay rendered for their exit animation.
    pub exit_animation: Duration,
    /// Auto-dismiss countdown for toasts.
    pub toast_duration: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tooltip_delay: Duration::from_millis(200),
            exit_animation: Duration::from_millis(150),
            toast_duration: Duration::from_millis(5000),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tooltip delay (builder).
    pub fn with_tooltip_delay(mut self, delay: Duration) -> Self {
        self.tooltip_delay = delay;
        self
    }

    /// Set the exit animation window (builder).
    pub fn with_exit_animation(mut self, window: Duration) -> Self {
        self.exit_animation = window;
        self
    }

    /// Set the toast duration (builder).
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// Document, timers and defaults, passed to every primitive operation.
#[derive(Default)]
pub struct Ui {
    pub document: Document,
    pub timers: Scheduler,
    pub config: UiConfig,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sleep in real time until the earliest timer is due, then pop it.
    ///
    /// Returns `None` immediately when nothing is scheduled.
    pub async fn next_timer(&mut self) -> Option<TimerId> {
        let deadline = self.timers.next_deadline()?;
        let wait = deadline.saturating_sub(self.timers.now());
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        self.timers.pop_expired(deadline)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Hosts mounted components and routes input and timers to them.
#[derive(Default)]
pub struct App {
    pub ui: Ui,
    pub lifecycle: LifecycleTracker,
    components: SlotMap<ComponentId, Box<dyn Component>>,
    /// Mount order; key events are offered newest first.
    order: Vec<ComponentId>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            ui: Ui::with_config(config),
            ..Self::default()
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Take ownership of a component that was mounted against `self.ui`.
    pub fn mount(&mut self, component: impl Component + 'static) -> ComponentId {
        let name = component.name().to_owned();
        let id = self.components.insert(Box::new(component));
        self.order.push(id);
        self.lifecycle.on_mount(id);
        debug!(?id, name = %name, "component mounted");
        id
    }

    /// Unmount a component, letting it release timers, listeners and nodes.
    pub fn unmount(&mut self, id: ComponentId) -> bool {
        let Some(mut component) = self.components.remove(id) else {
            return false;
        };
        component.unmount(&mut self.ui);
        self.order.retain(|&c| c != id);
        self.lifecycle.on_unmount(id);
        debug!(?id, name = component.name(), "component unmounted");
        true
    }

    /// Downcast a mounted component.
    pub fn get<T: Component + 'static>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Downcast a mounted component mutably.
    pub fn get_mut<T: Component + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Run `f` against a mounted component and the shared `Ui`.
    pub fn with<T: Component + 'static, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut T, &mut Ui) -> R,
    ) -> Option<R> {
        let component = self.components.get_mut(id)?.as_any_mut().downcast_mut::<T>()?;
        Some(f(component, &mut self.ui))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Deliver an event and run its default actions.
    ///
    /// A click first focuses its target when that is tabbable, as pressing
    /// the pointer would, and only then is delivered. An unhandled Tab moves
    /// focus through the document. Focus changes, whether from a default
    /// action or from a component reacting, are reported as `Blur`/`Focus`.
    pub fn dispatch(&mut self, event: UiEvent) -> EventResult {
        if let UiEvent::Click { target } = event {
            let focused_before = self.ui.document.active_element();
            let tabbable = self
                .ui
                .document
                .dom
                .get(target)
                .is_some_and(|data| data.is_tabbable());
            if tabbable && self.ui.document.is_rendered(target) {
                self.ui.document.focus(target);
            }
            self.report_focus_change(focused_before);
        }

        let focused_before = self.ui.document.active_element();
        let result = self.deliver(&event);

        if let UiEvent::Key { key, .. } = event {
            if !result.is_handled() && key.is_tab() {
                if key.is_shift_tab() {
                    self.ui.document.focus_previous();
                } else {
                    self.ui.document.focus_next();
                }
            }
        }

        self.report_focus_change(focused_before);
        result
    }

    /// Focus a node programmatically, reporting `Blur`/`Focus` like a user
    /// focus change would. Returns whether focus moved there.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focused_before = self.ui.document.active_element();
        let focused = self.ui.document.focus(node);
        self.report_focus_change(focused_before);
        focused
    }

    fn report_focus_change(&mut self, focused_before: Option<NodeId>) {
        let focused_after = self.ui.document.active_element();
        if focused_after == focused_before {
            return;
        }
        if let Some(old) = focused_before.filter(|&id| self.ui.document.contains(id)) {
            self.deliver(&UiEvent::Blur { target: old });
        }
        if let Some(new) = focused_after {
            self.deliver(&UiEvent::Focus { target: new });
        }
    }

    fn deliver(&mut self, event: &UiEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        match event {
            UiEvent::Key { .. } => {
                for &id in self.order.iter().rev() {
                    let Some(component) = self.components.get_mut(id) else {
                        continue;
                    };
                    if component.handle_event(&mut self.ui, event).is_handled() {
                        trace!(?id, "key handled");
                        return EventResult::Handled;
                    }
                }
            }
            _ => {
                for &id in &self.order {
                    let Some(component) = self.components.get_mut(id) else {
                        continue;
                    };
                    if component.handle_event(&mut self.ui, event).is_handled() {
                        result = EventResult::Handled;
                    }
                }
            }
        }
        result
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// Hand a fired timer to whichever component owns it.
    pub fn fire_timer(&mut self, timer: TimerId) -> bool {
        for &id in &self.order {
            if let Some(component) = self.components.get_mut(id) {
                if component.on_timer(&mut self.ui, timer) {
                    return true;
                }
            }
        }
        trace!(?timer, "timer had no owner");
        false
    }

    /// Move virtual time forward, firing timers (including ones scheduled by
    /// handlers inside the window) in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.ui.timers.now() + by;
        while let Some(timer) = self.ui.timers.pop_expired(until) {
            self.fire_timer(timer);
        }
        self.ui.timers.set_now(until);
    }

    /// Wait in real time for the next timer and fire it.
    pub async fn run_next_timer(&mut self) -> Option<TimerId> {
        let timer = self.ui.next_timer().await?;
        self.fire_timer(timer);
        Some(timer)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
