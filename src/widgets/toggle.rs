//! Checkbox and switch: a single focusable node over a [`TogglePrimitive`].

use std::any::Any;

use crate::app::Ui;
use crate::context::ContextError;
use crate::dom::{NodeData, NodeId, Role};
use crate::event::{EventResult, UiEvent};
use crate::primitives::TogglePrimitive;
use crate::state::{ChangeHandler, ControlledValue};
use crate::widget::Component;

use super::attach;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleKind {
    #[default]
    Checkbox,
    Switch,
}

impl ToggleKind {
    fn role(self) -> Role {
        match self {
            ToggleKind::Checkbox => Role::Checkbox,
            ToggleKind::Switch => Role::Switch,
        }
    }
}

#[derive(Default)]
pub struct ToggleConfig {
    pub kind: ToggleKind,
    pub label: String,
    pub checked: Option<bool>,
    pub default_checked: bool,
    pub disabled: bool,
    pub on_change: Option<ChangeHandler<bool>>,
}

impl ToggleConfig {
    pub fn checkbox(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn switch(label: impl Into<String>) -> Self {
        Self {
            kind: ToggleKind::Switch,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Control the checked state from outside (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn default_checked(mut self, checked: bool) -> Self {
        self.default_checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

pub struct ToggleControl {
    node: NodeId,
    kind: ToggleKind,
    toggle: TogglePrimitive,
}

impl ToggleControl {
    pub fn mount(
        ui: &mut Ui,
        parent: Option<NodeId>,
        config: ToggleConfig,
    ) -> Result<Self, ContextError> {
        let name = match config.kind {
            ToggleKind::Checkbox => "Checkbox",
            ToggleKind::Switch => "Switch",
        };
        let node = attach(
            &mut ui.document,
            parent,
            NodeData::new(config.kind.role())
                .with_label(config.label)
                .disabled(config.disabled),
            name,
        )?;
        let mut checked = ControlledValue::new(config.checked, config.default_checked);
        checked.set_on_change(config.on_change);
        Ok(Self {
            node,
            kind: config.kind,
            toggle: TogglePrimitive::new(checked).disabled(config.disabled),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> ToggleKind {
        self.kind
    }

    pub fn is_checked(&self) -> bool {
        self.toggle.is_checked()
    }

    pub fn is_disabled(&self) -> bool {
        self.toggle.is_disabled()
    }

    /// Apply the caller's `checked` value on re-render.
    pub fn sync_checked(&mut self, checked: Option<bool>) {
        self.toggle.sync(checked);
    }

    pub fn set_disabled(&mut self, ui: &mut Ui, disabled: bool) {
        self.toggle.set_disabled(disabled);
        if let Some(data) = ui.document.dom.get_mut(self.node) {
            data.disabled = disabled;
        }
    }
}

impl Component for ToggleControl {
    fn name(&self) -> &str {
        match self.kind {
            ToggleKind::Checkbox => "Checkbox",
            ToggleKind::Switch => "Switch",
        }
    }

    fn root(&self) -> NodeId {
        self.node
    }

    fn handle_event(&mut self, _ui: &mut Ui, event: &UiEvent) -> EventResult {
        match *event {
            UiEvent::Click { target } if target == self.node => self.toggle.click(),
            UiEvent::Key { target, key } if target == Some(self.node) => {
                self.toggle.handle_key(&key)
            }
            _ => EventResult::Ignored,
        }
    }

    fn unmount(&mut self, ui: &mut Ui) {
        ui.document.remove(self.node);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, KeyEvent, SPACE};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn logged(config: ToggleConfig) -> (Rc<RefCell<Vec<bool>>>, ToggleConfig) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, config.on_change(move |&v| sink.borrow_mut().push(v)))
    }

    fn key(node: NodeId, code: Key) -> UiEvent {
        UiEvent::Key {
            target: Some(node),
            key: KeyEvent::plain(code),
        }
    }

    #[test]
    fn click_and_keys_share_one_path() {
        let mut ui = Ui::new();
        let (log, config) = logged(ToggleConfig::checkbox("Accept"));
        let mut checkbox = ToggleControl::mount(&mut ui, None, config).unwrap();
        let node = checkbox.node();

        checkbox.handle_event(&mut ui, &UiEvent::Click { target: node });
        checkbox.handle_event(&mut ui, &key(node, SPACE));
        checkbox.handle_event(&mut ui, &key(node, Key::Enter));
        assert!(checkbox.is_checked());
        assert_eq!(*log.borrow(), vec![true, false, true]);
    }

    #[test]
    fn disabled_ignores_everything() {
        let mut ui = Ui::new();
        let (log, config) = logged(ToggleConfig::switch("Wifi").disabled(true));
        let mut switch = ToggleControl::mount(&mut ui, None, config).unwrap();
        let node = switch.node();

        let click = switch.handle_event(&mut ui, &UiEvent::Click { target: node });
        let space = switch.handle_event(&mut ui, &key(node, SPACE));
        assert!(!click.is_handled());
        assert!(!space.is_handled());
        assert!(!switch.is_checked());
        assert!(log.borrow().is_empty());
        assert!(!ui.document.dom.get(node).unwrap().is_tabbable());
    }

    #[test]
    fn controlled_checkbox_follows_caller() {
        let mut ui = Ui::new();
        let (log, config) = logged(ToggleConfig::checkbox("Sync").checked(false));
        let mut checkbox = ToggleControl::mount(&mut ui, None, config).unwrap();
        let node = checkbox.node();

        checkbox.handle_event(&mut ui, &UiEvent::Click { target: node });
        assert!(!checkbox.is_checked());
        assert_eq!(*log.borrow(), vec![true]);

        checkbox.sync_checked(Some(true));
        assert!(checkbox.is_checked());
    }

    #[test]
    fn re_enabling_restores_activation() {
        let mut ui = Ui::new();
        let mut switch =
            ToggleControl::mount(&mut ui, None, ToggleConfig::switch("Dark").disabled(true))
                .unwrap();
        switch.set_disabled(&mut ui, false);
        let node = switch.node();
        switch.handle_event(&mut ui, &UiEvent::Click { target: node });
        assert!(switch.is_checked());
        assert_eq!(switch.name(), "Switch");
    }
}
