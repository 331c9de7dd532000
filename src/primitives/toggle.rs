//! Checked/unchecked toggle shared by checkbox and switch.
//!
//! Pointer and keyboard activation both go through [`TogglePrimitive::activate`].

use tracing::debug;

use crate::event::{Action, EventResult, KeyEvent, Keymap};
use crate::state::ControlledValue;

#[derive(Debug)]
pub struct TogglePrimitive {
    checked: ControlledValue<bool>,
    disabled: bool,
    keymap: Keymap,
}

impl TogglePrimitive {
    pub fn new(checked: ControlledValue<bool>) -> Self {
        Self {
            checked,
            disabled: false,
            keymap: Keymap::toggle(),
        }
    }

    /// Set whether the toggle is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_checked(&self) -> bool {
        *self.checked.get()
    }

    pub fn is_controlled(&self) -> bool {
        self.checked.is_controlled()
    }

    /// Flip the effective value and notify. Does nothing at all when
    /// disabled. Returns whether anything happened.
    pub fn activate(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        let next = !self.is_checked();
        debug!(checked = next, controlled = self.checked.is_controlled(), "toggle activated");
        self.checked.set(next);
        true
    }

    /// Primary pointer activation.
    pub fn click(&mut self) -> EventResult {
        EventResult::from_bool(self.activate())
    }

    /// Space/Enter activation.
    pub fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        match self.keymap.resolve(key) {
            Some(Action::Activate) => EventResult::from_bool(self.activate()),
            _ => EventResult::Ignored,
        }
    }

    /// Apply the caller's `checked` value on re-render.
    pub fn sync(&mut self, checked: Option<bool>) {
        self.checked.sync(checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, SPACE};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_log(checked: ControlledValue<bool>) -> (TogglePrimitive, Rc<RefCell<Vec<bool>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let checked = checked.with_on_change(move |v: &bool| sink.borrow_mut().push(*v));
        (TogglePrimitive::new(checked), log)
    }

    #[test]
    fn uncontrolled_click_flips_and_notifies_once() {
        let (mut toggle, log) = with_log(ControlledValue::uncontrolled(false));
        assert!(toggle.click().is_handled());
        assert!(toggle.is_checked());
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn controlled_reports_but_keeps_prop() {
        let (mut toggle, log) = with_log(ControlledValue::controlled(false));
        toggle.click();
        toggle.handle_key(&KeyEvent::plain(SPACE));
        assert!(!toggle.is_checked());
        assert_eq!(*log.borrow(), vec![true, true]);
        toggle.sync(Some(true));
        assert!(toggle.is_checked());
    }

    #[test]
    fn keyboard_and_pointer_share_a_path() {
        let (mut toggle, log) = with_log(ControlledValue::uncontrolled(false));
        toggle.handle_key(&KeyEvent::plain(SPACE));
        toggle.handle_key(&KeyEvent::plain(Key::Enter));
        toggle.click();
        assert!(toggle.is_checked());
        assert_eq!(*log.borrow(), vec![true, false, true]);
    }

    #[test]
    fn disabled_swallows_everything() {
        let (toggle, log) = with_log(ControlledValue::uncontrolled(false));
        let mut toggle = toggle.disabled(true);
        assert_eq!(toggle.click(), EventResult::Ignored);
        assert_eq!(toggle.handle_key(&KeyEvent::plain(SPACE)), EventResult::Ignored);
        assert!(!toggle.is_checked());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn other_keys_are_ignored() {
        let (mut toggle, log) = with_log(ControlledValue::uncontrolled(true));
        assert_eq!(toggle.handle_key(&KeyEvent::plain(Key::Char('x'))), EventResult::Ignored);
        assert!(toggle.is_checked());
        assert!(log.borrow().is_empty());
    }
}
