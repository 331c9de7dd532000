//! Tooltip: shows its content after a hover/focus delay.
//!
//! The content node is portalled to the top level of the document so it is
//! never clipped by the trigger's ancestors.

use std::any::Any;
use std::time::Duration;

use crate::app::Ui;
use crate::context::ContextError;
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{EventResult, Key, UiEvent};
use crate::primitives::{DelayedDisclosure, DisclosureState};
use crate::timer::TimerId;
use crate::widget::Component;

use super::attach;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Side of the trigger the content is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Bottom => "bottom",
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TooltipConfig {
    pub label: String,
    pub content: String,
    /// Show delay; `None` uses [`UiConfig::tooltip_delay`](crate::app::UiConfig).
    pub delay: Option<Duration>,
    pub position: Position,
}

impl TooltipConfig {
    /// Tooltip for a trigger labelled `label`, showing `content`.
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

pub struct Tooltip {
    trigger: NodeId,
    content: NodeId,
    position: Position,
    disclosure: DelayedDisclosure,
}

impl Tooltip {
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: TooltipConfig,
    ) -> Result<Self, ContextError> {
        let trigger = attach(
            &mut ui.document,
            parent,
            NodeData::new(Role::Button).with_label(config.label),
            "Tooltip",
        )?;
        let content = ui.document.append(
            NodeData::new(Role::Tooltip)
                .with_label(config.content)
                .visible(false),
        );
        let delay = config.delay.unwrap_or(ui.config.tooltip_delay);
        Ok(Self {
            trigger,
            content,
            position: config.position,
            disclosure: DelayedDisclosure::new(delay, ui.config.exit_animation),
        })
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Logically shown.
    pub fn is_visible(&self) -> bool {
        self.disclosure.is_visible()
    }

    /// Shown, or hidden but still inside its exit window.
    pub fn is_rendered(&self) -> bool {
        self.disclosure.is_rendered()
    }

    pub fn state(&self) -> DisclosureState {
        self.disclosure.state()
    }

    fn show_later(&mut self, ui: &mut Ui) {
        self.disclosure.on_enter(&mut ui.timers);
        self.sync(ui);
    }

    fn hide(&mut self, ui: &mut Ui) {
        self.disclosure.on_leave(&mut ui.timers);
        self.sync(ui);
    }

    fn sync(&self, ui: &mut Ui) {
        ui.document
            .set_visible(self.content, self.disclosure.is_rendered());
    }
}

impl Component for Tooltip {
    fn name(&self) -> &str {
        "Tooltip"
    }

    fn root(&self) -> NodeId {
        self.trigger
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        match *event {
            UiEvent::PointerEnter { target } | UiEvent::Focus { target }
                if target == self.trigger =>
            {
                self.show_later(ui);
                EventResult::Ignored
            }
            UiEvent::PointerLeave { target } | UiEvent::Blur { target }
                if target == self.trigger =>
            {
                self.hide(ui);
                EventResult::Ignored
            }
            UiEvent::Key { target, key }
                if target == Some(self.trigger) && key.code == Key::Escape =>
            {
                let was_open = self.disclosure.is_visible() || self.disclosure.is_scheduled();
                self.hide(ui);
                EventResult::from_bool(was_open)
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_timer(&mut self, ui: &mut Ui, timer: TimerId) -> bool {
        if !self.disclosure.on_timer(timer, &mut ui.timers) {
            return false;
        }
        self.sync(ui);
        true
    }

    fn unmount(&mut self, ui: &mut Ui) {
        self.disclosure.dispose(&mut ui.timers);
        ui.document.remove(self.content);
        ui.document.remove(self.trigger);
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
