//! Select: a trigger button with a listbox of options.
//!
//! While the listbox is open the select registers a document-level
//! pointer-down listener; a click anywhere outside its subtree closes it.

use std::any::Any;
use std::fmt;

use crate::app::Ui;
use crate::context::ContextError;
use crate::document::{ListenerId, ListenerKind};
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{EventResult, UiEvent};
use crate::primitives::{ListNavigationState, ListNavigator, ListOption};
use crate::state::{ChangeHandler, ControlledValue};
use crate::widget::Component;

use super::attach;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub struct SelectConfig<K> {
    pub options: Vec<ListOption<K>>,
    /// Caller-managed selection. `Some(None)` controls it as "nothing".
    pub value: Option<Option<K>>,
    pub default_value: Option<K>,
    pub on_change: Option<ChangeHandler<Option<K>>>,
    pub placeholder: String,
}

impl<K> Default for SelectConfig<K> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            value: None,
            default_value: None,
            on_change: None,
            placeholder: "Select an option".to_owned(),
        }
    }
}

impl<K> SelectConfig<K> {
    pub fn new(options: Vec<ListOption<K>>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn value(mut self, value: Option<K>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn default_value(mut self, value: K) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&Option<K>) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

pub struct Select<K> {
    root: NodeId,
    trigger: NodeId,
    listbox: NodeId,
    option_nodes: Vec<NodeId>,
    placeholder: String,
    nav: ListNavigator<K>,
    outside_listener: Option<ListenerId>,
}

impl<K> Select<K>
where
    K: Clone + PartialEq + fmt::Debug + 'static,
{
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: SelectConfig<K>,
    ) -> Result<Self, ContextError> {
        let detached = ContextError::DetachedParent { component: "Select" };
        let root = attach(&mut ui.document, parent, NodeData::new(Role::Generic), "Select")?;
        let trigger = ui
            .document
            .append_child(root, NodeData::new(Role::Button))
            .ok_or(detached.clone())?;
        let listbox = ui
            .document
            .append_child(root, NodeData::new(Role::Listbox).visible(false))
            .ok_or(detached)?;

        let mut selection = ControlledValue::new(config.value, config.default_value);
        selection.set_on_change(config.on_change);

        let mut select = Self {
            root,
            trigger,
            listbox,
            option_nodes: Vec::new(),
            placeholder: config.placeholder,
            nav: ListNavigator::new(Vec::new(), selection),
            outside_listener: None,
        };
        select.set_options(ui, config.options);
        Ok(select)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn listbox(&self) -> NodeId {
        self.listbox
    }

    /// Node rendering the option at `index`.
    pub fn option_node(&self, index: usize) -> Option<NodeId> {
        self.option_nodes.get(index).copied()
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn selected(&self) -> Option<&K> {
        self.nav.selected()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.nav.highlighted_index()
    }

    pub fn state(&self) -> ListNavigationState<K> {
        self.nav.state()
    }

    /// Label of the selected option, or the placeholder.
    pub fn display_label(&self) -> &str {
        self.nav
            .selected_index()
            .and_then(|i| self.nav.options().get(i))
            .map_or(self.placeholder.as_str(), |o| o.label.as_str())
    }

    // ── Props ────────────────────────────────────────────────────────

    /// Replace the options and their nodes.
    pub fn set_options(&mut self, ui: &mut Ui, options: Vec<ListOption<K>>) {
        for node in self.option_nodes.drain(..) {
            ui.document.remove(node);
        }
        for option in &options {
            let data = NodeData::new(Role::ListOption)
                .with_label(option.label.clone())
                .disabled(option.disabled);
            if let Some(node) = ui.document.append_child(self.listbox, data) {
                self.option_nodes.push(node);
            }
        }
        self.nav.set_options(options);
        self.sync(ui);
    }

    /// Apply the caller's `value` on re-render.
    pub fn set_value(&mut self, ui: &mut Ui, value: Option<Option<K>>) {
        self.nav.sync_value(value);
        self.sync(ui);
    }

    pub fn open(&mut self, ui: &mut Ui) {
        self.nav.open();
        self.sync(ui);
    }

    pub fn close(&mut self, ui: &mut Ui) {
        self.nav.close();
        self.sync(ui);
    }

    /// Bring nodes and the outside-click listener in line with the state.
    fn sync(&mut self, ui: &mut Ui) {
        let open = self.nav.is_open();
        ui.document.set_visible(self.listbox, open);
        let label = self.display_label().to_owned();
        if let Some(data) = ui.document.dom.get_mut(self.trigger) {
            data.label = label;
        }
        match (open, self.outside_listener.is_some()) {
            (true, false) => {
                self.outside_listener =
                    Some(ui.document.add_listener(ListenerKind::PointerDown, self.root));
            }
            (false, true) => ui.document.remove_listener_slot(&mut self.outside_listener),
            _ => {}
        }
    }

    fn option_index(&self, node: NodeId) -> Option<usize> {
        self.option_nodes.iter().position(|&n| n == node)
    }

    fn owns(&self, ui: &Ui, node: NodeId) -> bool {
        ui.document.dom.is_within(self.root, node)
    }
}

impl<K> Component for Select<K>
where
    K: Clone + PartialEq + fmt::Debug + 'static,
{
    fn name(&self) -> &str {
        "Select"
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult {
        let result = match *event {
            UiEvent::Key { target: Some(target), key } if self.owns(ui, target) => {
                self.nav.handle_key(&key)
            }
            UiEvent::Click { target } if target == self.trigger => {
                self.nav.toggle();
                EventResult::Handled
            }
            UiEvent::Click { target } => match self.option_index(target) {
                Some(index) => {
                    self.nav.select_index(index);
                    EventResult::Handled
                }
                None => {
                    if self.outside_listener.is_some() && !self.owns(ui, target) {
                        self.nav.pointer_outside();
                    }
                    EventResult::Ignored
                }
            },
            UiEvent::PointerEnter { target } => {
                if let Some(index) = self.option_index(target) {
                    self.nav.hover_index(index);
                }
                EventResult::Ignored
            }
            UiEvent::Blur { target } if target == self.trigger => {
                self.nav.close();
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        };
        self.sync(ui);
        result
    }

    fn unmount(&mut self, ui: &mut Ui) {
        ui.document.remove_listener_slot(&mut self.outside_listener);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, KeyEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options() -> Vec<ListOption<&'static str>> {
        vec![
            ListOption::new("option1", "Option 1"),
            ListOption::new("option2", "Option 2").disabled(true),
            ListOption::new("option3", "Option 3"),
        ]
    }

    fn press(ui: &mut Ui, select: &mut Select<&'static str>, code: Key) -> EventResult {
        let event = UiEvent::Key {
            target: Some(select.trigger()),
            key: KeyEvent::plain(code),
        };
        select.handle_event(ui, &event)
    }

    fn recorded() -> (Rc<RefCell<Vec<Option<&'static str>>>>, SelectConfig<&'static str>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let config = SelectConfig::new(options()).on_change(move |v| sink.borrow_mut().push(*v));
        (log, config)
    }

    #[test]
    fn keyboard_selection_skips_disabled() {
        let mut ui = Ui::new();
        let (log, config) = recorded();
        let mut select = Select::mount(&mut ui, None, config).unwrap();

        select.open(&mut ui);
        press(&mut ui, &mut select, Key::Down);
        press(&mut ui, &mut select, Key::Down);
        assert_eq!(select.highlighted_index(), Some(2));
        press(&mut ui, &mut select, Key::Enter);

        assert_eq!(select.selected(), Some(&"option3"));
        assert_eq!(*log.borrow(), vec![Some("option3")]);
        assert!(!select.is_open());
        assert_eq!(ui.document.dom.get(select.trigger()).unwrap().label, "Option 3");
    }

    #[test]
    fn placeholder_until_selected() {
        let mut ui = Ui::new();
        let select = Select::mount(
            &mut ui,
            None,
            SelectConfig::new(options()).placeholder("Pick one"),
        )
        .unwrap();
        assert_eq!(select.display_label(), "Pick one");
        assert!(!ui.document.is_rendered(select.listbox()));
    }

    #[test]
    fn clicking_disabled_option_is_ignored() {
        let mut ui = Ui::new();
        let (log, config) = recorded();
        let mut select = Select::mount(&mut ui, None, config).unwrap();
        let trigger = select.trigger();
        select.handle_event(&mut ui, &UiEvent::Click { target: trigger });
        assert!(select.is_open());

        let disabled = select.option_node(1).unwrap();
        select.handle_event(&mut ui, &UiEvent::Click { target: disabled });
        assert!(select.is_open());
        assert!(log.borrow().is_empty());

        let first = select.option_node(0).unwrap();
        select.handle_event(&mut ui, &UiEvent::Click { target: first });
        assert_eq!(select.selected(), Some(&"option1"));
        assert!(!select.is_open());
    }

    #[test]
    fn outside_click_closes_and_drops_listener() {
        let mut ui = Ui::new();
        let elsewhere = ui.document.append(NodeData::new(Role::Button));
        let mut select = Select::mount(&mut ui, None, SelectConfig::new(options())).unwrap();
        select.open(&mut ui);
        assert_eq!(ui.document.listener_count(), 1);

        let inside = select.listbox();
        select.handle_event(&mut ui, &UiEvent::Click { target: inside });
        assert!(select.is_open());

        select.handle_event(&mut ui, &UiEvent::Click { target: elsewhere });
        assert!(!select.is_open());
        assert_eq!(select.selected(), None);
        assert_eq!(ui.document.listener_count(), 0);
    }

    #[test]
    fn escape_keeps_selection() {
        let mut ui = Ui::new();
        let mut select = Select::mount(
            &mut ui,
            None,
            SelectConfig::new(options()).default_value("option3"),
        )
        .unwrap();
        press(&mut ui, &mut select, Key::Down);
        assert!(select.is_open());
        assert_eq!(select.highlighted_index(), Some(2));
        press(&mut ui, &mut select, Key::Up);
        press(&mut ui, &mut select, Key::Escape);
        assert!(!select.is_open());
        assert_eq!(select.selected(), Some(&"option3"));
    }

    #[test]
    fn controlled_value_does_not_drift() {
        let mut ui = Ui::new();
        let (log, config) = recorded();
        let mut select = Select::mount(&mut ui, None, config.value(Some("option1"))).unwrap();
        select.open(&mut ui);
        press(&mut ui, &mut select, Key::End);
        press(&mut ui, &mut select, Key::Enter);
        assert_eq!(select.selected(), Some(&"option1"));
        assert_eq!(*log.borrow(), vec![Some("option3")]);

        select.set_value(&mut ui, Some(Some("option3")));
        assert_eq!(select.display_label(), "Option 3");
    }

    #[test]
    fn set_options_rebuilds_nodes() {
        let mut ui = Ui::new();
        let mut select = Select::mount(&mut ui, None, SelectConfig::new(options())).unwrap();
        let old = select.option_node(0).unwrap();
        select.set_options(&mut ui, vec![ListOption::new("only", "Only")]);
        assert!(!ui.document.contains(old));
        assert!(select.option_node(1).is_none());
        assert_eq!(ui.document.dom.children(select.listbox()).len(), 1);
    }

    #[test]
    fn unmount_while_open_removes_listener() {
        let mut ui = Ui::new();
        let mut select = Select::mount(&mut ui, None, SelectConfig::new(options())).unwrap();
        select.open(&mut ui);
        select.unmount(&mut ui);
        assert_eq!(ui.document.listener_count(), 0);
    }
}
