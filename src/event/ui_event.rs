//! Targeted UI events and the result a handler reports back.

use crate::dom::NodeId;

use super::input::KeyEvent;

/// An input event delivered to components.
///
/// Every variant carries the node the event was aimed at. Key events target
/// the active element, which may be nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Key pressed while `target` had focus.
    Key { target: Option<NodeId>, key: KeyEvent },
    /// Primary pointer pressed and released on `target`.
    Click { target: NodeId },
    /// Pointer moved onto `target`.
    PointerEnter { target: NodeId },
    /// Pointer moved off `target`.
    PointerLeave { target: NodeId },
    /// `target` received focus.
    Focus { target: NodeId },
    /// `target` lost focus.
    Blur { target: NodeId },
}

impl UiEvent {
    /// The node this event is aimed at, if any.
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            UiEvent::Key { target, .. } => target,
            UiEvent::Click { target }
            | UiEvent::PointerEnter { target }
            | UiEvent::PointerLeave { target }
            | UiEvent::Focus { target }
            | UiEvent::Blur { target } => Some(target),
        }
    }

    /// The key event, for key variants.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            UiEvent::Key { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Outcome of offering an event to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// The event was not relevant; let others (and the default action) see it.
    #[default]
    Ignored,
    /// The component consumed the event; its default action is prevented.
    Handled,
}

impl EventResult {
    /// Whether the event was consumed.
    pub fn is_handled(self) -> bool {
        self == EventResult::Handled
    }

    /// `Handled` when `handled` is true.
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}
