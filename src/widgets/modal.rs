//! Modal dialog: overlay, focus trap, scroll lock and Escape handling.
//!
//! While open the modal holds one scroll-lock reference and a document-level
//! key listener, and traps Tab inside its panel. Closing releases all three
//! and hands focus back to whatever had it before.

use std::any::Any;

use tracing::debug;

use crate::app::Ui;
use crate::context::ContextError;
use crate::document::{ListenerId, ListenerKind};
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{EventResult, UiEvent};
use crate::primitives::{FocusTrap, FocusTrapState, TrapOutcome};
use crate::state::ControlledValue;
use crate::widget::Component;

use super::Callback;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub struct ModalConfig {
    pub title: String,
    /// Caller-managed open state. `None` leaves it to the modal.
    pub open: Option<bool>,
    pub default_open: bool,
    pub close_on_escape: bool,
    pub close_on_overlay_click: bool,
    /// Called whenever the modal asks to close.
    pub on_close: Option<Callback>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            open: None,
            default_open: false,
            close_on_escape: true,
            close_on_overlay_click: true,
            on_close: None,
        }
    }
}

impl ModalConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Control the open state from outside (builder).
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn close_on_overlay_click(mut self, enabled: bool) -> Self {
        self.close_on_overlay_click = enabled;
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

pub struct Modal {
    overlay: NodeId,
    panel: NodeId,
    close_button: NodeId,
    open: ControlledValue<bool>,
    trap: FocusTrap,
    close_on_overlay_click: bool,
    /// Side effects of being open are in place.
    active: bool,
    key_listener: Option<ListenerId>,
}

impl Modal {
    /// Mount the overlay at the top level of the document. Opens right away
    /// if the config says so.
    pub fn mount(ui: &mut Ui, config: ModalConfig) -> Result<Self, ContextError> {
        let detached = ContextError::DetachedParent { component: "Modal" };
        let overlay = ui
            .document
            .append(NodeData::new(Role::Overlay).visible(false));
        let panel = ui
            .document
            .append_child(
                overlay,
                NodeData::new(Role::Dialog)
                    .with_label(config.title)
                    .tab_index(-1),
            )
            .ok_or(detached.clone())?;
        let close_button = ui
            .document
            .append_child(panel, NodeData::new(Role::Button).with_label("Close"))
            .ok_or(detached)?;

        let mut open = ControlledValue::new(config.open, config.default_open);
        if let Some(mut on_close) = config.on_close {
            open = open.with_on_change(move |&open: &bool| {
                if !open {
                    on_close();
                }
            });
        }

        let mut modal = Self {
            overlay,
            panel,
            close_button,
            open,
            trap: FocusTrap::new(panel).close_on_escape(config.close_on_escape),
            close_on_overlay_click: config.close_on_overlay_click,
            active: false,
            key_listener: None,
        };
        modal.apply(ui);
        Ok(modal)
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    /// The dialog node; append content here.
    pub fn panel(&self) -> NodeId {
        self.panel
    }

    pub fn close_button(&self) -> NodeId {
        self.close_button
    }

    /// Effective open state.
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    pub fn trap_state(&self) -> Option<FocusTrapState> {
        self.trap.state()
    }

    /// Ask to open.
    pub fn open(&mut self, ui: &mut Ui) {
        self.open.set(true);
        self.apply(ui);
    }

    /// Ask to close. A controlled modal stays open until the caller syncs.
    /// Closing a modal that is already closed does nothing.
    pub fn close(&mut self, ui: &mut Ui) {
        if !self.is_open() {
            return;
        }
        self.open.set(false);
        self.apply(ui);
    }

    /// Apply the caller's `open` value on re-render.
    pub fn sync_open(&mut self, ui: &mut Ui, open: Option<bool>) {
        self.open.sync(open);
        self.apply(ui);
    }

    fn apply(&mut self, ui: &mut Ui) {
        let want = self.is_open();
        if want && !self.active {
            ui.document.set_visible(self.overlay, true);
            ui.document.lock_scroll();
            self.key_listener = Some(ui.document.add_listener(ListenerKind::KeyDown, self.panel));
            self.trap.activate(&mut ui.document);
            self.active = true;
            debug!(panel = ?self.panel, "modal opened");
        } else if !want && self.active {
            self.release(ui);
            debug!(panel = ?self.panel, "modal closed");
        }
    }

    /// Keys aimed inside another open overlay belong to that dialog.
    fn owns_key(&self, ui: &Ui, target: Option<NodeId>) -> bool {
        let Some(target) = target else {
            return true;
        };
        let dom = &ui.document.dom;
        if dom.is_within(self.overlay, target) {
            return true;
        }
        !std::iter::once(target)
            .chain(dom.ancestors(target))
            .filter_map(|id| dom.get(id))
            .any(|data| data.role == Role::Overlay && data.visible)
    }

    fn release(&mut self, ui: &mut Ui) {
        self.trap.deactivate(&mut ui.document);
        ui.document.unlock_scroll();
        ui.document.remove_listener_slot(&mut self.key_listener);
        ui.document.set_visible(self.overlay, false);
        self.active = false;
    }
}

impl Component for Modal {
    fn name(&self) -> &str {
        "Modal"
    }

    fn root(&self) -> NodeId {
        self.overlay
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        if !self.active {
            return EventResult::Ignored;
        }
        match *event {
            UiEvent::Key { target, key } if self.key_listener.is_some() => {
                if !self.owns_key(ui, target) {
                    return EventResult::Ignored;
                }
                match self.trap.handle_key(&mut ui.document, &key) {
                    TrapOutcome::PassThrough => EventResult::Ignored,
                    TrapOutcome::Contained => EventResult::Handled,
                    TrapOutcome::CloseRequested => {
                        self.close(ui);
                        EventResult::Handled
                    }
                }
            }
            UiEvent::Click { target } if target == self.close_button => {
                self.close(ui);
                EventResult::Handled
            }
            UiEvent::Click { target } if target == self.overlay => {
                if self.close_on_overlay_click {
                    self.close(ui);
                }
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }

    fn unmount(&mut self, ui: &mut Ui) {
        if self.active {
            self.release(ui);
        }
        ui.document.remove(self.overlay);
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
