//! Keymaps: key+modifier combinations resolved to widget [`Action`]s.
//!
//! Each primitive owns a [`Keymap`] built from one of the default
//! constructors (`toggle()`, `listbox()`, `tabs()`, `dismiss()`), so callers
//! can rebind keys per widget instance without touching the primitive.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers, SPACE};

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What a key press means to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Flip / press the control.
    Activate,
    /// Commit the highlighted entry.
    Confirm,
    /// Close whatever is open without committing.
    Dismiss,
    /// Move the cursor forward.
    Next,
    /// Move the cursor backward.
    Previous,
    /// Jump to the first entry.
    First,
    /// Jump to the last entry.
    Last,
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> Action.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<(Key, Modifiers), Action>,
}

impl Keymap {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Space and Enter activate (checkbox, switch, accordion trigger).
    pub fn toggle() -> Self {
        let mut keymap = Self::new();
        keymap.bind(SPACE, Modifiers::NONE, Action::Activate);
        keymap.bind(Key::Enter, Modifiers::NONE, Action::Activate);
        keymap
    }

    /// Vertical listbox: arrows move, Enter/Space commit, Escape closes.
    pub fn listbox() -> Self {
        let mut keymap = Self::new();
        keymap.bind(Key::Down, Modifiers::NONE, Action::Next);
        keymap.bind(Key::Up, Modifiers::NONE, Action::Previous);
        keymap.bind(Key::Home, Modifiers::NONE, Action::First);
        keymap.bind(Key::End, Modifiers::NONE, Action::Last);
        keymap.bind(Key::Enter, Modifiers::NONE, Action::Confirm);
        keymap.bind(SPACE, Modifiers::NONE, Action::Confirm);
        keymap.bind(Key::Escape, Modifiers::NONE, Action::Dismiss);
        keymap
    }

    /// Horizontal tab list: left/right move, Home/End jump.
    pub fn tabs() -> Self {
        let mut keymap = Self::new();
        keymap.bind(Key::Right, Modifiers::NONE, Action::Next);
        keymap.bind(Key::Left, Modifiers::NONE, Action::Previous);
        keymap.bind(Key::Home, Modifiers::NONE, Action::First);
        keymap.bind(Key::End, Modifiers::NONE, Action::Last);
        keymap
    }

    /// Escape dismisses (dialog, tooltip).
    pub fn dismiss() -> Self {
        let mut keymap = Self::new();
        keymap.bind(Key::Escape, Modifiers::NONE, Action::Dismiss);
        keymap
    }

    /// Register a key binding, replacing any existing one for the combination.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: Action) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding. Returns the removed action, if any.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<Action> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a key event (exact key + modifiers match).
    pub fn resolve(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the keymap has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_defaults() {
        let keymap = Keymap::toggle();
        assert_eq!(keymap.len(), 2);
        assert_eq!(keymap.resolve(&KeyEvent::plain(SPACE)), Some(Action::Activate));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Enter)), Some(Action::Activate));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Char('x'))), None);
    }

    #[test]
    fn listbox_defaults() {
        let keymap = Keymap::listbox();
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Down)), Some(Action::Next));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Up)), Some(Action::Previous));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Escape)), Some(Action::Dismiss));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Enter)), Some(Action::Confirm));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let keymap = Keymap::toggle();
        assert_eq!(
            keymap.resolve(&KeyEvent::new(Key::Enter, Modifiers::CTRL)),
            None
        );
    }

    #[test]
    fn rebind_and_unbind() {
        let mut keymap = Keymap::tabs();
        keymap.bind(Key::Char('l'), Modifiers::NONE, Action::Next);
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Char('l'))), Some(Action::Next));
        assert_eq!(keymap.unbind(Key::Home, Modifiers::NONE), Some(Action::First));
        assert_eq!(keymap.resolve(&KeyEvent::plain(Key::Home)), None);
        assert_eq!(keymap.unbind(Key::Home, Modifiers::NONE), None);
    }

    #[test]
    fn empty_keymap() {
        assert!(Keymap::new().is_empty());
        assert!(Keymap::default().is_empty());
    }
}
