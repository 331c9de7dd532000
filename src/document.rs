//! The shared document: node tree, active element, document-level listeners,
//! scroll lock, and context values.
//!
//! [`Document`] is the only resource every component touches. Native Tab
//! navigation lives here too; focus traps intercept Tab before it arrives.

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::context::ContextMap;
use crate::dom::{Dom, NodeData, NodeId};

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

new_key_type! {
    /// Handle to a document-level listener registration.
    pub struct ListenerId;
}

/// Kinds of document-level listener a component can register.
///
/// The registry records who listens for what; it does not route events.
/// [`App`](crate::app::App) still delivers every event to every component,
/// and a component acts on document-level input only while it holds a
/// registration of the matching kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer pressed anywhere (outside-click detection).
    PointerDown,
    /// Key pressed anywhere (global Escape handling).
    KeyDown,
    /// Viewport resized (overlay repositioning).
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    kind: ListenerKind,
    owner: NodeId,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Shared document state.
pub struct Document {
    /// The node tree.
    pub dom: Dom,
    /// Context values provided by compound widgets.
    pub contexts: ContextMap,
    active: Option<NodeId>,
    listeners: SlotMap<ListenerId, Listener>,
    scroll_locks: usize,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            dom: Dom::new(),
            contexts: ContextMap::new(),
            active: None,
            listeners: SlotMap::with_key(),
            scroll_locks: 0,
        }
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Append a top-level node.
    pub fn append(&mut self, data: NodeData) -> NodeId {
        self.dom.insert(data)
    }

    /// Append a child node. `None` if `parent` is gone.
    pub fn append_child(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        self.dom.insert_child(parent, data)
    }

    /// Remove a subtree, clearing focus and contexts that lived inside it.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.dom.contains(id) {
            return None;
        }
        let subtree = self.dom.walk_depth_first(id);
        if self.active.is_some_and(|active| subtree.contains(&active)) {
            trace!(?id, "active element removed with subtree");
            self.active = None;
        }
        for node in &subtree {
            self.contexts.remove(*node);
        }
        self.dom.remove(id)
    }

    /// Whether the node is still attached.
    pub fn contains(&self, id: NodeId) -> bool {
        self.dom.contains(id)
    }

    /// Show or hide a node. No-op for detached nodes.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(data) = self.dom.get_mut(id) {
            data.visible = visible;
        }
    }

    /// Whether the node is attached and neither it nor an ancestor is hidden.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.dom.is_rendered(id)
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// The focused node, if it is still attached.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&id| self.dom.contains(id))
    }

    /// Move focus to `id`. Any attached, rendered, enabled node can take
    /// programmatic focus, tabbable or not. Returns whether focus moved.
    pub fn focus(&mut self, id: NodeId) -> bool {
        let focusable = self.dom.is_rendered(id)
            && self.dom.get(id).is_some_and(|data| !data.disabled);
        if !focusable {
            trace!(?id, "focus refused");
            return false;
        }
        if self.active != Some(id) {
            debug!(?id, "focus moved");
            self.active = Some(id);
        }
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Every tabbable node in document order.
    pub fn tab_order(&self) -> Vec<NodeId> {
        self.dom
            .document_order()
            .into_iter()
            .filter(|&id| {
                self.dom.get(id).is_some_and(NodeData::is_tabbable) && self.dom.is_rendered(id)
            })
            .collect()
    }

    /// Native Tab: move focus to the next tabbable node, wrapping around.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        self.step_focus(true)
    }

    /// Native Shift+Tab: move focus to the previous tabbable node, wrapping.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> Option<NodeId> {
        let order = self.tab_order();
        if order.is_empty() {
            return None;
        }
        let current = self
            .active_element()
            .and_then(|id| order.iter().position(|&n| n == id));
        let next = match (current, forward) {
            (Some(idx), true) => (idx + 1) % order.len(),
            (Some(0), false) | (None, false) => order.len() - 1,
            (Some(idx), false) => idx - 1,
            (None, true) => 0,
        };
        let target = order[next];
        self.focus(target);
        Some(target)
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Register a document-level listener owned by `owner`.
    pub fn add_listener(&mut self, kind: ListenerKind, owner: NodeId) -> ListenerId {
        let id = self.listeners.insert(Listener { kind, owner });
        trace!(?id, ?kind, ?owner, "listener added");
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id).is_some();
        if removed {
            trace!(?id, "listener removed");
        }
        removed
    }

    /// Remove the listener held in `slot`, if any, leaving `None` behind.
    pub fn remove_listener_slot(&mut self, slot: &mut Option<ListenerId>) {
        if let Some(id) = slot.take() {
            self.remove_listener(id);
        }
    }

    /// Whether the listener is still registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Owners of every listener of `kind`. Order is unspecified.
    pub fn listener_owners(&self, kind: ListenerKind) -> Vec<NodeId> {
        self.listeners
            .values()
            .filter(|l| l.kind == kind)
            .map(|l| l.owner)
            .collect()
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Scroll lock ──────────────────────────────────────────────────

    /// Take one scroll-lock reference.
    pub fn lock_scroll(&mut self) {
        self.scroll_locks += 1;
        debug!(count = self.scroll_locks, "scroll lock acquired");
    }

    /// Release one scroll-lock reference. Extra releases are ignored.
    pub fn unlock_scroll(&mut self) {
        self.scroll_locks = self.scroll_locks.saturating_sub(1);
        debug!(count = self.scroll_locks, "scroll lock released");
    }

    /// Whether body scrolling is locked (at least one holder).
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locks > 0
    }

    /// Number of outstanding scroll-lock references.
    pub fn scroll_lock_count(&self) -> usize {
        self.scroll_locks
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
