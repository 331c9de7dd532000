//! Tabs: a row of tab buttons, each selecting one panel.
//!
//! Tabs use a roving tab index: only the selected tab is reachable with Tab,
//! and the arrow keys move focus and selection along the row, wrapping at
//! both ends and skipping disabled tabs.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::app::Ui;
use crate::context::ContextError;
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{Action, EventResult, Keymap, UiEvent};
use crate::primitives::{step_enabled, Direction};
use crate::state::{ChangeHandler, ControlledValue};
use crate::widget::Component;

use super::attach;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TabsConfig {
    /// Caller-managed selection.
    pub value: Option<Option<String>>,
    pub default_value: Option<String>,
    pub on_change: Option<ChangeHandler<Option<String>>>,
}

impl TabsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control the selected tab from outside (builder).
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(Some(value.into()));
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&Option<String>) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

// ---------------------------------------------------------------------------
// Shared scope
// ---------------------------------------------------------------------------

struct TabEntry {
    value: String,
    node: NodeId,
    disabled: bool,
}

struct TabsShared {
    selected: ControlledValue<Option<String>>,
    tabs: Vec<TabEntry>,
    panels: Vec<(String, NodeId)>,
}

impl TabsShared {
    /// The selected value if it names a tab, else the first enabled tab.
    fn active_value(&self) -> Option<String> {
        let selected = self.selected.get().as_ref();
        selected
            .filter(|value| self.tabs.iter().any(|t| &t.value == *value))
            .cloned()
            .or_else(|| {
                self.tabs
                    .iter()
                    .find(|t| !t.disabled)
                    .map(|t| t.value.clone())
            })
    }
}

#[derive(Clone)]
struct TabsScope(Rc<RefCell<TabsShared>>);

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub struct Tabs {
    root: NodeId,
    shared: TabsScope,
    keymap: Keymap,
}

impl Tabs {
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: TabsConfig,
    ) -> Result<Self, ContextError> {
        let root = attach(&mut ui.document, parent, NodeData::new(Role::Generic), "Tabs")?;
        let mut selected = ControlledValue::new(config.value, config.default_value);
        selected.set_on_change(config.on_change);
        let shared = TabsScope(Rc::new(RefCell::new(TabsShared {
            selected,
            tabs: Vec::new(),
            panels: Vec::new(),
        })));
        ui.document.contexts.provide(root, shared.clone());
        Ok(Self {
            root,
            shared,
            keymap: Keymap::tabs(),
        })
    }

    /// Node to mount [`Tab`]s and [`TabPanel`]s under.
    pub fn node(&self) -> NodeId {
        self.root
    }

    /// The tab currently shown.
    pub fn active_value(&self) -> Option<String> {
        self.shared.0.borrow().active_value()
    }

    /// Select the tab with `value`. Disabled or unknown tabs are ignored.
    pub fn select(&mut self, ui: &mut Ui, value: &str) {
        {
            let mut shared = self.shared.0.borrow_mut();
            if !shared.tabs.iter().any(|t| t.value == value && !t.disabled) {
                return;
            }
            debug!(value, "tab selected");
            shared.selected.set(Some(value.to_owned()));
        }
        refresh(&self.shared, ui);
    }

    /// Apply the caller's `value` on re-render.
    pub fn sync_value(&mut self, ui: &mut Ui, value: Option<Option<String>>) {
        self.shared.0.borrow_mut().selected.sync(value);
        refresh(&self.shared, ui);
    }

    fn tab_index_of(&self, node: NodeId) -> Option<usize> {
        self.shared.0.borrow().tabs.iter().position(|t| t.node == node)
    }

    fn step(&self, from: usize, action: Action) -> Option<(String, NodeId)> {
        let shared = self.shared.0.borrow();
        let tabs = &shared.tabs;
        let disabled = |i: usize| tabs[i].disabled;
        let index = match action {
            Action::Next => step_enabled(tabs.len(), disabled, Some(from), Direction::Forward, true),
            Action::Previous => {
                step_enabled(tabs.len(), disabled, Some(from), Direction::Backward, true)
            }
            Action::First => step_enabled(tabs.len(), disabled, None, Direction::Forward, false),
            Action::Last => step_enabled(tabs.len(), disabled, None, Direction::Backward, false),
            _ => None,
        }?;
        tabs.get(index).map(|t| (t.value.clone(), t.node))
    }
}

/// Roving tab index on the tabs, visibility on the panels.
fn refresh(scope: &TabsScope, ui: &mut Ui) {
    let shared = scope.0.borrow();
    let active = shared.active_value();
    let is_active = |value: &String| active.as_ref() == Some(value);
    for tab in &shared.tabs {
        if let Some(data) = ui.document.dom.get_mut(tab.node) {
            data.tab_index = Some(if is_active(&tab.value) { 0 } else { -1 });
        }
    }
    for (value, node) in &shared.panels {
        ui.document.set_visible(*node, is_active(value));
    }
}

impl Component for Tabs {
    fn name(&self) -> &str {
        "Tabs"
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        match *event {
            UiEvent::Click { target } => {
                let Some(index) = self.tab_index_of(target) else {
                    return EventResult::Ignored;
                };
                let entry = {
                    let shared = self.shared.0.borrow();
                    shared.tabs.get(index).map(|t| (t.value.clone(), t.disabled))
                };
                match entry {
                    Some((value, false)) => {
                        self.select(ui, &value);
                        EventResult::Handled
                    }
                    _ => EventResult::Ignored,
                }
            }
            UiEvent::Key {
                target: Some(target),
                key,
            } => {
                let Some(from) = self.tab_index_of(target) else {
                    return EventResult::Ignored;
                };
                let Some(action) = self.keymap.resolve(&key) else {
                    return EventResult::Ignored;
                };
                if let Some((value, node)) = self.step(from, action) {
                    self.select(ui, &value);
                    ui.document.focus(node);
                }
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }

    fn unmount(&mut self, ui: &mut Ui) {
        ui.document.remove(self.root);
        let mut shared = self.shared.0.borrow_mut();
        shared.tabs.clear();
        shared.panels.clear();
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

/// A tab button selecting the panel with the same value.
pub struct Tab {
    node: NodeId,
}

impl Tab {
    pub fn mount(
        ui: &mut Ui,
        parent: NodeId,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, ContextError> {
        Self::mount_with(ui, parent, value.into(), label.into(), false)
    }

    pub fn mount_disabled(
        ui: &mut Ui,
        parent: NodeId,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, ContextError> {
        Self::mount_with(ui, parent, value.into(), label.into(), true)
    }

    fn mount_with(
        ui: &mut Ui,
        parent: NodeId,
        value: String,
        label: String,
        disabled: bool,
    ) -> Result<Self, ContextError> {
        let doc = &mut ui.document;
        let (_, scope) = doc
            .contexts
            .require::<TabsScope>(&doc.dom, parent, "Tab", "Tabs")?;
        let scope = scope.clone();
        let node = attach(
            doc,
            Some(parent),
            NodeData::new(Role::Tab).with_label(label).disabled(disabled),
            "Tab",
        )?;
        scope.0.borrow_mut().tabs.push(TabEntry {
            value,
            node,
            disabled,
        });
        refresh(&scope, ui);
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Content shown while its tab is selected.
pub struct TabPanel {
    node: NodeId,
}

impl TabPanel {
    pub fn mount(
        ui: &mut Ui,
        parent: NodeId,
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ContextError> {
        let doc = &mut ui.document;
        let (_, scope) = doc
            .contexts
            .require::<TabsScope>(&doc.dom, parent, "TabPanel", "Tabs")?;
        let scope = scope.clone();
        let node = attach(
            doc,
            Some(parent),
            NodeData::new(Role::TabPanel).with_label(text),
            "TabPanel",
        )?;
        scope.0.borrow_mut().panels.push((value.into(), node));
        refresh(&scope, ui);
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

// ===========================================================================
// Tests
// ===========================================================================
