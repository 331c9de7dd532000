//! Keyboard list navigation for listbox-style widgets (select).
//!
//! The navigator owns the open flag, the highlighted cursor and the selected
//! value. Movement skips disabled entries and clamps at the ends. Disabled
//! entries can never become the selection.

use tracing::debug;

use crate::event::{Action, EventResult, KeyEvent, Keymap};
use crate::state::ControlledValue;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption<K> {
    pub value: K,
    pub label: String,
    pub disabled: bool,
}

impl<K> ListOption<K> {
    pub fn new(value: K, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    /// Set whether the entry is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Direction of a cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Next enabled index from `from` in `direction`.
///
/// With no starting point, forward lands on the first enabled entry and
/// backward on the last. At an end the cursor stays put unless `wrap` is set.
/// Returns `None` only when nothing is enabled.
pub fn step_enabled(
    len: usize,
    is_disabled: impl Fn(usize) -> bool,
    from: Option<usize>,
    direction: Direction,
    wrap: bool,
) -> Option<usize> {
    let enabled = |i: &usize| !is_disabled(*i);
    let Some(from) = from.filter(|&i| i < len) else {
        return match direction {
            Direction::Forward => (0..len).find(enabled),
            Direction::Backward => (0..len).rev().find(enabled),
        };
    };
    let found = match direction {
        Direction::Forward => (from + 1..len).find(enabled),
        Direction::Backward => (0..from).rev().find(enabled),
    };
    match (found, wrap) {
        (Some(i), _) => Some(i),
        (None, true) => match direction {
            Direction::Forward => (0..=from).find(enabled),
            Direction::Backward => (from..len).rev().find(enabled),
        },
        (None, false) => Some(from).filter(enabled),
    }
}

// ---------------------------------------------------------------------------
// ListNavigator
// ---------------------------------------------------------------------------

/// Snapshot of the navigator for queries and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNavigationState<K> {
    pub is_open: bool,
    pub highlighted_index: Option<usize>,
    pub selected_value: Option<K>,
}

#[derive(Debug)]
pub struct ListNavigator<K> {
    options: Vec<ListOption<K>>,
    open: bool,
    highlighted: Option<usize>,
    selection: ControlledValue<Option<K>>,
    keymap: Keymap,
}

impl<K: Clone + PartialEq + std::fmt::Debug> ListNavigator<K> {
    pub fn new(options: Vec<ListOption<K>>, selection: ControlledValue<Option<K>>) -> Self {
        Self {
            options,
            open: false,
            highlighted: None,
            selection,
            keymap: Keymap::listbox(),
        }
    }

    /// Replace the default listbox keymap (builder).
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn options(&self) -> &[ListOption<K>] {
        &self.options
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&ListOption<K>> {
        self.highlighted.and_then(|i| self.options.get(i))
    }

    /// The effective selected value.
    pub fn selected(&self) -> Option<&K> {
        self.selection.get().as_ref()
    }

    /// Index of the option matching the selected value.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected()?;
        self.options.iter().position(|o| &o.value == selected)
    }

    pub fn state(&self) -> ListNavigationState<K> {
        ListNavigationState {
            is_open: self.open,
            highlighted_index: self.highlighted,
            selected_value: self.selected().cloned(),
        }
    }

    // ── Open / close ─────────────────────────────────────────────────

    /// Open the list with the cursor on the selected entry, if it is enabled.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.highlighted = self
            .selected_index()
            .filter(|&i| !self.options[i].disabled);
        debug!(highlighted = ?self.highlighted, "listbox opened");
    }

    /// Close without touching the selection.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.highlighted = None;
        debug!("listbox closed");
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Offer a key press. Arrow keys and Enter/Space on a closed list open it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(action) = self.keymap.resolve(key) else {
            return EventResult::Ignored;
        };

        if !self.open {
            return match action {
                Action::Next | Action::Previous | Action::Confirm | Action::Activate => {
                    self.open();
                    EventResult::Handled
                }
                _ => EventResult::Ignored,
            };
        }

        match action {
            Action::Next => self.move_cursor(Direction::Forward),
            Action::Previous => self.move_cursor(Direction::Backward),
            Action::First => self.highlighted = self.step(None, Direction::Forward),
            Action::Last => self.highlighted = self.step(None, Direction::Backward),
            Action::Confirm | Action::Activate => {
                if let Some(index) = self.highlighted {
                    self.select_index(index);
                }
            }
            Action::Dismiss => self.close(),
        }
        EventResult::Handled
    }

    /// Pointer on an entry: same as confirming it. Disabled entries are
    /// ignored. Returns whether the selection was committed.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(option) = self.options.get(index).filter(|o| !o.disabled) else {
            return false;
        };
        let value = option.value.clone();
        debug!(index, ?value, "option selected");
        self.selection.set(Some(value));
        self.close();
        true
    }

    /// Pointer pressed outside the widget.
    pub fn pointer_outside(&mut self) {
        self.close();
    }

    /// Pointer hovering an entry moves the cursor to it (enabled only).
    pub fn hover_index(&mut self, index: usize) {
        if self.open && self.options.get(index).is_some_and(|o| !o.disabled) {
            self.highlighted = Some(index);
        }
    }

    // ── Props ────────────────────────────────────────────────────────

    /// Replace the options, dropping a highlight that no longer points at
    /// an enabled entry.
    pub fn set_options(&mut self, options: Vec<ListOption<K>>) {
        self.options = options;
        if self
            .highlighted
            .is_some_and(|i| self.options.get(i).is_none_or(|o| o.disabled))
        {
            self.highlighted = None;
        }
    }

    /// Apply the caller's value on re-render. `Some(v)` controls the
    /// selection (`v` may be `None` for "nothing selected").
    pub fn sync_value(&mut self, value: Option<Option<K>>) {
        self.selection.sync(value);
    }

    fn move_cursor(&mut self, direction: Direction) {
        self.highlighted = self.step(self.highlighted, direction);
    }

    fn step(&self, from: Option<usize>, direction: Direction) -> Option<usize> {
        step_enabled(
            self.options.len(),
            |i| self.options[i].disabled,
            from,
            direction,
            false,
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, SPACE};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options() -> Vec<ListOption<&'static str>> {
        vec![
            ListOption::new("option1", "Option 1"),
            ListOption::new("option2", "Option 2").disabled(true),
            ListOption::new("option3", "Option 3"),
        ]
    }

    fn navigator() -> (ListNavigator<&'static str>, Rc<RefCell<Vec<Option<&'static str>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let selection = ControlledValue::uncontrolled(None)
            .with_on_change(move |v: &Option<&'static str>| sink.borrow_mut().push(*v));
        (ListNavigator::new(options(), selection), log)
    }

    fn press(nav: &mut ListNavigator<&'static str>, key: Key) -> EventResult {
        nav.handle_key(&KeyEvent::plain(key))
    }

    #[test]
    fn arrow_down_skips_disabled_and_enter_commits() {
        let (mut nav, log) = navigator();
        nav.open();
        assert_eq!(nav.highlighted_index(), None);
        press(&mut nav, Key::Down);
        assert_eq!(nav.highlighted_index(), Some(0));
        press(&mut nav, Key::Down);
        assert_eq!(nav.highlighted_index(), Some(2));
        press(&mut nav, Key::Enter);

        assert_eq!(nav.selected(), Some(&"option3"));
        assert!(!nav.is_open());
        assert_eq!(*log.borrow(), vec![Some("option3")]);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let (mut nav, _log) = navigator();
        nav.open();
        for _ in 0..5 {
            press(&mut nav, Key::Down);
        }
        assert_eq!(nav.highlighted_index(), Some(2));
        for _ in 0..5 {
            press(&mut nav, Key::Up);
        }
        assert_eq!(nav.highlighted_index(), Some(0));
    }

    #[test]
    fn arrow_up_from_nothing_lands_on_last_enabled() {
        let (mut nav, _log) = navigator();
        nav.open();
        press(&mut nav, Key::Up);
        assert_eq!(nav.highlighted_index(), Some(2));
        press(&mut nav, Key::Home);
        assert_eq!(nav.highlighted_index(), Some(0));
        press(&mut nav, Key::End);
        assert_eq!(nav.highlighted_index(), Some(2));
    }

    #[test]
    fn open_highlights_selected_entry() {
        let selection = ControlledValue::uncontrolled(Some("option3"));
        let mut nav = ListNavigator::new(options(), selection);
        nav.open();
        assert_eq!(nav.highlighted_index(), Some(2));
    }

    #[test]
    fn escape_closes_without_selecting() {
        let (mut nav, log) = navigator();
        nav.open();
        press(&mut nav, Key::Down);
        assert_eq!(press(&mut nav, Key::Escape), EventResult::Handled);
        assert!(!nav.is_open());
        assert_eq!(nav.selected(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn outside_pointer_closes_without_selecting() {
        let (mut nav, log) = navigator();
        nav.open();
        press(&mut nav, Key::Down);
        nav.pointer_outside();
        assert!(!nav.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn disabled_entry_cannot_be_clicked_or_hovered() {
        let (mut nav, log) = navigator();
        nav.open();
        assert!(!nav.select_index(1));
        nav.hover_index(1);
        assert_eq!(nav.highlighted_index(), None);
        assert!(nav.is_open());
        assert!(!nav.select_index(9));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn click_enabled_entry_commits() {
        let (mut nav, log) = navigator();
        nav.open();
        assert!(nav.select_index(0));
        assert_eq!(nav.selected(), Some(&"option1"));
        assert!(!nav.is_open());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn keys_on_closed_list_open_it() {
        let (mut nav, _log) = navigator();
        assert_eq!(press(&mut nav, Key::Escape), EventResult::Ignored);
        assert_eq!(press(&mut nav, SPACE), EventResult::Handled);
        assert!(nav.is_open());
        nav.close();
        press(&mut nav, Key::Down);
        assert!(nav.is_open());
        assert_eq!(press(&mut nav, Key::Char('q')), EventResult::Ignored);
    }

    #[test]
    fn enter_without_highlight_keeps_list_open() {
        let (mut nav, log) = navigator();
        nav.open();
        press(&mut nav, Key::Enter);
        assert!(nav.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn controlled_selection_does_not_drift() {
        let selection = ControlledValue::new(Some(Some("option1")), None);
        let mut nav = ListNavigator::new(options(), selection);
        nav.open();
        nav.select_index(2);
        assert_eq!(nav.selected(), Some(&"option1"));
        nav.sync_value(Some(Some("option3")));
        assert_eq!(nav.selected_index(), Some(2));
    }

    #[test]
    fn set_options_drops_disabled_highlight() {
        let (mut nav, _log) = navigator();
        nav.open();
        press(&mut nav, Key::Down);
        let mut next = options();
        next[0].disabled = true;
        nav.set_options(next);
        assert_eq!(nav.highlighted_index(), None);
    }

    #[test]
    fn step_enabled_wraps_when_asked() {
        let disabled = [false, true, false];
        let is_disabled = |i: usize| disabled[i];
        assert_eq!(step_enabled(3, is_disabled, Some(2), Direction::Forward, true), Some(0));
        assert_eq!(step_enabled(3, is_disabled, Some(0), Direction::Backward, true), Some(2));
        assert_eq!(step_enabled(3, is_disabled, Some(2), Direction::Forward, false), Some(2));
        assert_eq!(step_enabled(3, |_| true, None, Direction::Forward, true), None);
        assert_eq!(step_enabled(0, |_| false, None, Direction::Backward, false), None);
    }
}
