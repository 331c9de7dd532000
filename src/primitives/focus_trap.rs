//! Focus trap: keep Tab cycling inside a container while it is active.
//!
//! An active trap moves focus itself on every Tab, so native tab order never
//! runs while it holds focus.
//!
//! Activation remembers what had focus and moves focus into the container.
//! Deactivation hands focus back, provided the remembered node still exists.

use tracing::debug;

use crate::document::Document;
use crate::dom::NodeId;
use crate::event::{Action, KeyEvent, Keymap};

/// What the trap did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Not the trap's business; the default action should run.
    PassThrough,
    /// Tab moved focus inside the container; prevent the default action.
    Contained,
    /// Escape was pressed and closing on Escape is enabled. The owner decides
    /// whether to deactivate.
    CloseRequested,
}

/// Captured state while the trap is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrapState {
    pub previously_focused: Option<NodeId>,
    pub container: NodeId,
}

#[derive(Debug)]
pub struct FocusTrap {
    container: NodeId,
    close_on_escape: bool,
    keymap: Keymap,
    state: Option<FocusTrapState>,
}

impl FocusTrap {
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            close_on_escape: true,
            keymap: Keymap::dismiss(),
            state: None,
        }
    }

    /// Whether Escape reports [`TrapOutcome::CloseRequested`] (builder).
    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<FocusTrapState> {
        self.state
    }

    /// Remember the active element and move focus to the first tabbable
    /// descendant, or to the container when there is none. No-op if active.
    pub fn activate(&mut self, doc: &mut Document) {
        if self.state.is_some() {
            return;
        }
        let previously_focused = doc.active_element();
        self.state = Some(FocusTrapState {
            previously_focused,
            container: self.container,
        });
        let target = doc
            .dom
            .tabbable_within(self.container)
            .first()
            .copied()
            .unwrap_or(self.container);
        doc.focus(target);
        debug!(container = ?self.container, ?previously_focused, "focus trap activated");
    }

    /// Release the trap and restore focus to the remembered node if it is
    /// still attached. Safe to call when inactive.
    pub fn deactivate(&mut self, doc: &mut Document) {
        let Some(state) = self.state.take() else {
            return;
        };
        if let Some(previous) = state.previously_focused {
            if doc.contains(previous) {
                doc.focus(previous);
            }
        }
        debug!(container = ?self.container, "focus trap released");
    }

    /// Offer a key press to the trap.
    pub fn handle_key(&mut self, doc: &mut Document, key: &KeyEvent) -> TrapOutcome {
        if self.state.is_none() {
            return TrapOutcome::PassThrough;
        }
        if key.is_tab() {
            return self.cycle(doc, key.is_shift_tab());
        }
        if self.close_on_escape && self.keymap.resolve(key) == Some(Action::Dismiss) {
            return TrapOutcome::CloseRequested;
        }
        TrapOutcome::PassThrough
    }

    fn cycle(&self, doc: &mut Document, backwards: bool) -> TrapOutcome {
        let tabbable = doc.dom.tabbable_within(self.container);
        let (Some(&first), Some(&last)) = (tabbable.first(), tabbable.last()) else {
            doc.focus(self.container);
            return TrapOutcome::Contained;
        };

        let position = doc
            .active_element()
            .and_then(|current| tabbable.iter().position(|&id| id == current));
        let target = match (position, backwards) {
            (None, false) => first,
            (None, true) => last,
            (Some(i), false) => tabbable.get(i + 1).copied().unwrap_or(first),
            (Some(0), true) => last,
            (Some(i), true) => tabbable[i - 1],
        };
        doc.focus(target);
        TrapOutcome::Contained
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{NodeData, Role};
    use crate::event::{Key, Modifiers};

    struct Fixture {
        doc: Document,
        opener: NodeId,
        dialog: NodeId,
        a: NodeId,
        b: NodeId,
    }

    /// Page with an opener button and a dialog holding buttons A and B.
    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let body = doc.append(NodeData::new(Role::Region));
        let opener = doc.append_child(body, NodeData::new(Role::Button)).unwrap();
        let dialog = doc.append(NodeData::new(Role::Dialog).tab_index(-1));
        let a = doc.append_child(dialog, NodeData::new(Role::Button).with_id("a")).unwrap();
        let b = doc.append_child(dialog, NodeData::new(Role::Button).with_id("b")).unwrap();
        doc.focus(opener);
        Fixture { doc, opener, dialog, a, b }
    }

    fn tab() -> KeyEvent {
        KeyEvent::plain(Key::Tab)
    }

    fn shift_tab() -> KeyEvent {
        KeyEvent::new(Key::BackTab, Modifiers::SHIFT)
    }

    #[test]
    fn activate_focuses_first_descendant() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.a));
        assert_eq!(
            trap.state(),
            Some(FocusTrapState {
                previously_focused: Some(f.opener),
                container: f.dialog,
            })
        );
    }

    #[test]
    fn tab_wraps_last_to_first_and_back() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);

        assert_eq!(trap.handle_key(&mut f.doc, &tab()), TrapOutcome::Contained);
        assert_eq!(f.doc.active_element(), Some(f.b));

        assert_eq!(trap.handle_key(&mut f.doc, &tab()), TrapOutcome::Contained);
        assert_eq!(f.doc.active_element(), Some(f.a));

        assert_eq!(trap.handle_key(&mut f.doc, &shift_tab()), TrapOutcome::Contained);
        assert_eq!(f.doc.active_element(), Some(f.b));
    }

    #[test]
    fn deactivate_restores_focus() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        trap.deactivate(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.opener));
        assert!(!trap.is_active());
    }

    #[test]
    fn deactivate_twice_does_not_restore_again() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        trap.deactivate(&mut f.doc);
        f.doc.focus(f.b);
        trap.deactivate(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.b));
    }

    #[test]
    fn detached_opener_is_not_restored() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        f.doc.remove(f.opener);
        trap.deactivate(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.a));
    }

    #[test]
    fn empty_container_takes_focus_and_swallows_tab() {
        let mut doc = Document::new();
        let body = doc.append(NodeData::new(Role::Region));
        let opener = doc.append_child(body, NodeData::new(Role::Button)).unwrap();
        let dialog = doc.append(NodeData::new(Role::Dialog).tab_index(-1));
        doc.focus(opener);

        let mut trap = FocusTrap::new(dialog);
        trap.activate(&mut doc);
        assert_eq!(doc.active_element(), Some(dialog));
        assert_eq!(trap.handle_key(&mut doc, &tab()), TrapOutcome::Contained);
        assert_eq!(trap.handle_key(&mut doc, &shift_tab()), TrapOutcome::Contained);
        assert_eq!(doc.active_element(), Some(dialog));
    }

    #[test]
    fn escaped_focus_is_pulled_back() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        f.doc.focus(f.opener);
        assert_eq!(trap.handle_key(&mut f.doc, &shift_tab()), TrapOutcome::Contained);
        assert_eq!(f.doc.active_element(), Some(f.b));
    }

    #[test]
    fn escape_requests_close_only_when_enabled() {
        let mut f = fixture();
        let esc = KeyEvent::plain(Key::Escape);

        let mut trap = FocusTrap::new(f.dialog);
        trap.activate(&mut f.doc);
        assert_eq!(trap.handle_key(&mut f.doc, &esc), TrapOutcome::CloseRequested);
        // The trap itself stays active until its owner deactivates it.
        assert!(trap.is_active());
        trap.deactivate(&mut f.doc);

        let mut quiet = FocusTrap::new(f.dialog).close_on_escape(false);
        quiet.activate(&mut f.doc);
        assert_eq!(quiet.handle_key(&mut f.doc, &esc), TrapOutcome::PassThrough);
    }

    #[test]
    fn inactive_trap_passes_everything() {
        let mut f = fixture();
        let mut trap = FocusTrap::new(f.dialog);
        assert_eq!(trap.handle_key(&mut f.doc, &tab()), TrapOutcome::PassThrough);
        trap.deactivate(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.opener));
    }
}
