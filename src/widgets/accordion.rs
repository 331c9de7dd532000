//! Accordion: compound widget of items, each a trigger and a content region.
//!
//! [`Accordion`] provides a scope on its root node. [`AccordionItem`] must be
//! mounted inside that scope, and [`AccordionTrigger`]/[`AccordionContent`]
//! inside an item. Mounting any of them elsewhere fails with
//! [`ContextError::MissingProvider`].

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::app::Ui;
use crate::context::ContextError;
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{Action, EventResult, Key, Keymap, Modifiers, UiEvent};
use crate::primitives::{step_enabled, Direction};
use crate::state::{ChangeHandler, ControlledValue};
use crate::widget::Component;

use super::attach;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// How many items may be expanded at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccordionKind {
    #[default]
    Single,
    Multiple,
}

pub struct AccordionConfig {
    pub kind: AccordionKind,
    /// Single mode: whether the open item can be collapsed again.
    pub collapsible: bool,
    pub value: Option<Vec<String>>,
    pub default_value: Vec<String>,
    pub on_change: Option<ChangeHandler<Vec<String>>>,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            kind: AccordionKind::Single,
            collapsible: true,
            value: None,
            default_value: Vec::new(),
            on_change: None,
        }
    }
}

impl AccordionConfig {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn multiple() -> Self {
        Self {
            kind: AccordionKind::Multiple,
            ..Self::default()
        }
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Control the expanded items from outside (builder).
    pub fn value(mut self, value: Vec<String>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn default_value(mut self, value: Vec<String>) -> Self {
        self.default_value = value;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&Vec<String>) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

// ---------------------------------------------------------------------------
// Shared scope
// ---------------------------------------------------------------------------

struct ItemEntry {
    value: String,
    disabled: bool,
    trigger: Option<NodeId>,
    content: Option<NodeId>,
}

struct AccordionShared {
    kind: AccordionKind,
    collapsible: bool,
    expanded: ControlledValue<Vec<String>>,
    items: Vec<ItemEntry>,
}

impl AccordionShared {
    fn is_expanded(&self, value: &str) -> bool {
        self.expanded.get().iter().any(|v| v == value)
    }

    fn entry_mut(&mut self, value: &str) -> Option<&mut ItemEntry> {
        self.items.iter_mut().find(|e| e.value == value)
    }
}

#[derive(Clone)]
struct AccordionScope(Rc<RefCell<AccordionShared>>);

#[derive(Clone)]
struct ItemScope {
    accordion: AccordionScope,
    value: String,
}

// ---------------------------------------------------------------------------
// Accordion
// ---------------------------------------------------------------------------

pub struct Accordion {
    root: NodeId,
    shared: AccordionScope,
    keymap: Keymap,
}

impl Accordion {
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: AccordionConfig,
    ) -> Result<Self, ContextError> {
        let root = attach(&mut ui.document, parent, NodeData::new(Role::Generic), "Accordion")?;
        let mut expanded = ControlledValue::new(config.value, config.default_value);
        expanded.set_on_change(config.on_change);
        let shared = AccordionScope(Rc::new(RefCell::new(AccordionShared {
            kind: config.kind,
            collapsible: config.collapsible,
            expanded,
            items: Vec::new(),
        })));
        ui.document.contexts.provide(root, shared.clone());

        let mut keymap = Keymap::toggle();
        keymap.bind(Key::Down, Modifiers::NONE, Action::Next);
        keymap.bind(Key::Up, Modifiers::NONE, Action::Previous);
        keymap.bind(Key::Home, Modifiers::NONE, Action::First);
        keymap.bind(Key::End, Modifiers::NONE, Action::Last);

        Ok(Self {
            root,
            shared,
            keymap,
        })
    }

    /// Node to mount [`AccordionItem`]s under.
    pub fn node(&self) -> NodeId {
        self.root
    }

    /// Effective list of expanded item values.
    pub fn expanded(&self) -> Vec<String> {
        self.shared.0.borrow().expanded.get().clone()
    }

    pub fn is_expanded(&self, value: &str) -> bool {
        self.shared.0.borrow().is_expanded(value)
    }

    /// Expand or collapse an item as its trigger would.
    pub fn toggle_item(&mut self, ui: &mut Ui, value: &str) {
        {
            let mut shared = self.shared.0.borrow_mut();
            if shared.items.iter().any(|e| e.value == value && e.disabled) {
                return;
            }
            let current = shared.expanded.get().clone();
            let open = current.iter().any(|v| v == value);
            let next = match (shared.kind, open) {
                (AccordionKind::Single, true) if shared.collapsible => Vec::new(),
                (AccordionKind::Single, true) => return,
                (AccordionKind::Single, false) => vec![value.to_owned()],
                (AccordionKind::Multiple, true) => {
                    current.into_iter().filter(|v| v != value).collect()
                }
                (AccordionKind::Multiple, false) => {
                    let mut next = current;
                    next.push(value.to_owned());
                    next
                }
            };
            debug!(value, ?next, "accordion toggled");
            shared.expanded.set(next);
        }
        self.refresh(ui);
    }

    /// Apply the caller's `value` on re-render.
    pub fn sync_value(&mut self, ui: &mut Ui, value: Option<Vec<String>>) {
        self.shared.0.borrow_mut().expanded.sync(value);
        self.refresh(ui);
    }

    fn refresh(&self, ui: &mut Ui) {
        let shared = self.shared.0.borrow();
        for entry in &shared.items {
            if let Some(content) = entry.content {
                ui.document.set_visible(content, shared.is_expanded(&entry.value));
            }
        }
    }

    fn item_for_trigger(&self, node: NodeId) -> Option<(usize, String, bool)> {
        let shared = self.shared.0.borrow();
        shared
            .items
            .iter()
            .enumerate()
            .find(|(_, e)| e.trigger == Some(node))
            .map(|(i, e)| (i, e.value.clone(), e.disabled))
    }

    fn move_focus(&self, ui: &mut Ui, from: usize, action: Action) -> EventResult {
        let target = {
            let shared = self.shared.0.borrow();
            let items = &shared.items;
            let unusable = |i: usize| items[i].disabled || items[i].trigger.is_none();
            let index = match action {
                Action::Next => step_enabled(items.len(), unusable, Some(from), Direction::Forward, true),
                Action::Previous => {
                    step_enabled(items.len(), unusable, Some(from), Direction::Backward, true)
                }
                Action::First => step_enabled(items.len(), unusable, None, Direction::Forward, false),
                Action::Last => step_enabled(items.len(), unusable, None, Direction::Backward, false),
                _ => None,
            };
            index.and_then(|i| items[i].trigger)
        };
        match target {
            Some(node) => EventResult::from_bool(ui.document.focus(node)),
            None => EventResult::Ignored,
        }
    }
}

impl Component for Accordion {
    fn name(&self) -> &str {
        "Accordion"
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        match *event {
            UiEvent::Click { target } => match self.item_for_trigger(target) {
                Some((_, value, false)) => {
                    self.toggle_item(ui, &value);
                    EventResult::Handled
                }
                _ => EventResult::Ignored,
            },
            UiEvent::Key {
                target: Some(target),
                key,
            } => {
                let Some((index, value, disabled)) = self.item_for_trigger(target) else {
                    return EventResult::Ignored;
                };
                match self.keymap.resolve(&key) {
                    Some(Action::Activate) if !disabled => {
                        self.toggle_item(ui, &value);
                        EventResult::Handled
                    }
                    Some(action @ (Action::Next | Action::Previous | Action::First | Action::Last)) => {
                        self.move_focus(ui, index, action)
                    }
                    _ => EventResult::Ignored,
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn unmount(&mut self, ui: &mut Ui) {
        ui.document.remove(self.root);
        self.shared.0.borrow_mut().items.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Sub-components
// ---------------------------------------------------------------------------

/// One collapsible section, identified by its value.
pub struct AccordionItem {
    node: NodeId,
    value: String,
}

impl AccordionItem {
    pub fn mount(ui: &mut Ui, parent: NodeId, value: impl Into<String>) -> Result<Self, ContextError> {
        Self::mount_with(ui, parent, value, false)
    }

    /// Mount an item whose trigger cannot be activated.
    pub fn mount_disabled(
        ui: &mut Ui,
        parent: NodeId,
        value: impl Into<String>,
    ) -> Result<Self, ContextError> {
        Self::mount_with(ui, parent, value, true)
    }

    fn mount_with(
        ui: &mut Ui,
        parent: NodeId,
        value: impl Into<String>,
        disabled: bool,
    ) -> Result<Self, ContextError> {
        let doc = &mut ui.document;
        let (_, scope) =
            doc.contexts
                .require::<AccordionScope>(&doc.dom, parent, "AccordionItem", "Accordion")?;
        let scope = scope.clone();
        let value = value.into();
        let node = attach(doc, Some(parent), NodeData::new(Role::Generic), "AccordionItem")?;
        scope.0.borrow_mut().items.push(ItemEntry {
            value: value.clone(),
            disabled,
            trigger: None,
            content: None,
        });
        doc.contexts.provide(
            node,
            ItemScope {
                accordion: scope,
                value: value.clone(),
            },
        );
        Ok(Self { node, value })
    }

    /// Node to mount the trigger and content under.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The button that expands or collapses its item.
pub struct AccordionTrigger {
    node: NodeId,
}

impl AccordionTrigger {
    pub fn mount(ui: &mut Ui, parent: NodeId, label: impl Into<String>) -> Result<Self, ContextError> {
        let doc = &mut ui.document;
        let (_, item) =
            doc.contexts
                .require::<ItemScope>(&doc.dom, parent, "AccordionTrigger", "AccordionItem")?;
        let item = item.clone();
        let mut shared = item.accordion.0.borrow_mut();
        let disabled = shared.entry_mut(&item.value).is_some_and(|e| e.disabled);
        let node = attach(
            doc,
            Some(parent),
            NodeData::new(Role::Button).with_label(label).disabled(disabled),
            "AccordionTrigger",
        )?;
        if let Some(entry) = shared.entry_mut(&item.value) {
            entry.trigger = Some(node);
        }
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// The region shown while its item is expanded.
pub struct AccordionContent {
    node: NodeId,
}

impl AccordionContent {
    pub fn mount(ui: &mut Ui, parent: NodeId, text: impl Into<String>) -> Result<Self, ContextError> {
        let doc = &mut ui.document;
        let (_, item) =
            doc.contexts
                .require::<ItemScope>(&doc.dom, parent, "AccordionContent", "AccordionItem")?;
        let item = item.clone();
        let mut shared = item.accordion.0.borrow_mut();
        let expanded = shared.is_expanded(&item.value);
        let node = attach(
            doc,
            Some(parent),
            NodeData::new(Role::Region).with_label(text).visible(expanded),
            "AccordionContent",
        )?;
        if let Some(entry) = shared.entry_mut(&item.value) {
            entry.content = Some(node);
        }
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

// ===========================================================================
// Tests
// ===========================================================================
