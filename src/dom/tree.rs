//! Tree operations: insert, remove, walk, containment.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The node tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that removal is O(subtree size) and lookup is O(1).
/// Several top-level nodes may coexist: the first is the page body, later ones
/// are portals (dialogs, tooltips, toasts) appended after it in document order.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    roots: Vec<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a top-level node (no parent). It is appended to the root list.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.roots.push(id);
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children.get_mut(parent)?.push(id);
        Some(id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        match self.parent.remove(id) {
            Some(parent_id) => {
                if let Some(siblings) = self.children.get_mut(parent_id) {
                    siblings.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut removed = None;
        for current in self.walk_depth_first(id) {
            self.children.remove(current);
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Empty if the node has none or is gone.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Walk from `id` up to its top-level node, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `node` is `ancestor` itself or lies somewhere below it.
    pub fn is_within(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.nodes.contains_key(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent.get(id).copied();
        }
        false
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the DOM.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node is still attached (has not been removed).
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start` (inclusive).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Every node in document order: each root's subtree, roots in order.
    pub fn document_order(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .flat_map(|&root| self.walk_depth_first(root))
            .collect()
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Role;

    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region).with_id("root"));
        let a = dom.insert_child(root, NodeData::new(Role::Generic).with_id("a")).unwrap();
        let b = dom.insert_child(root, NodeData::new(Role::Generic).with_id("b")).unwrap();
        let c = dom.insert_child(a, NodeData::new(Role::Button).with_id("c")).unwrap();
        let d = dom.insert_child(a, NodeData::new(Role::Link).with_id("d")).unwrap();
        (dom, root, a, b, c, d)
    }

    #[test]
    fn insert_appends_root() {
        let mut dom = Dom::new();
        let first = dom.insert(NodeData::new(Role::Region));
        let second = dom.insert(NodeData::new(Role::Dialog));
        assert_eq!(dom.roots(), &[first, second]);
    }

    #[test]
    fn insert_child_into_missing_parent() {
        let mut dom = Dom::new();
        let gone = dom.insert(NodeData::new(Role::Region));
        dom.remove(gone);
        assert!(dom.insert_child(gone, NodeData::new(Role::Button)).is_none());
        assert!(dom.is_empty());
    }

    #[test]
    fn parent_and_children() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.parent(a), Some(root));
        assert_eq!(dom.parent(root), None);
        assert_eq!(dom.children(root), &[a, b]);
        assert_eq!(dom.children(a), &[c, d]);
        assert!(dom.children(c).is_empty());
    }

    #[test]
    fn ancestors() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.ancestors(c), vec![a, root]);
        assert!(dom.ancestors(root).is_empty());
    }

    #[test]
    fn is_within() {
        let (dom, root, a, b, c, _d) = build_tree();
        assert!(dom.is_within(a, c));
        assert!(dom.is_within(root, c));
        assert!(dom.is_within(a, a));
        assert!(!dom.is_within(b, c));
        assert!(!dom.is_within(c, a));
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        let removed = dom.remove(a).unwrap();
        assert_eq!(removed.id.as_deref(), Some("a"));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert_eq!(dom.children(root), &[b]);
        assert_eq!(dom.len(), 2);
        assert!(!dom.is_within(root, c));
    }

    #[test]
    fn remove_root_detaches_from_root_list() {
        let (mut dom, root, ..) = build_tree();
        let portal = dom.insert(NodeData::new(Role::Dialog));
        dom.remove(root);
        assert_eq!(dom.roots(), &[portal]);
        assert_eq!(dom.len(), 1);
    }

    #[test]
    fn remove_twice_is_none() {
        let (mut dom, _root, _a, _b, c, _d) = build_tree();
        assert!(dom.remove(c).is_some());
        assert!(dom.remove(c).is_none());
    }

    #[test]
    fn walk_depth_first() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(dom.walk_depth_first(a), vec![a, c, d]);
    }

    #[test]
    fn document_order_spans_portals() {
        let (mut dom, root, a, b, c, d) = build_tree();
        let portal = dom.insert(NodeData::new(Role::Dialog));
        let inner = dom.insert_child(portal, NodeData::new(Role::Button)).unwrap();
        assert_eq!(dom.document_order(), vec![root, a, c, d, b, portal, inner]);
    }
}
