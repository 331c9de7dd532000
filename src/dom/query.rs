//! DOM queries: by id, focusable descendants, generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` field matches the given string.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Descendants of `container` (excluding the container itself) matching
    /// `predicate`, in document order.
    pub fn query_within(
        &self,
        container: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Vec<NodeId> {
        self.walk_depth_first(container)
            .into_iter()
            .skip(1)
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Tabbable descendants of `container` in document order.
    ///
    /// Hidden subtrees are skipped entirely, not just hidden nodes.
    pub fn tabbable_within(&self, container: NodeId) -> Vec<NodeId> {
        self.query_within(container, NodeData::is_tabbable)
            .into_iter()
            .filter(|&id| self.is_rendered(id))
            .collect()
    }

    /// Whether the node and all of its ancestors are visible.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let Some(data) = self.get(id) else {
            return false;
        };
        data.visible
            && self
                .ancestors(id)
                .into_iter()
                .all(|a| self.get(a).is_some_and(|d| d.visible))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::{NodeData, Role};
    use crate::dom::tree::Dom;

    /// ```text
    ///        dialog #dialog
    ///       /     |       \
    ///   input   group     div[tabindex=0]
    ///   #name  (hidden)   #card
    ///            |
    ///          button #hidden-btn
    /// ```
    #[test]
    fn tabbable_within_skips_hidden_subtrees() {
        let mut dom = Dom::new();
        let dialog = dom.insert(NodeData::new(Role::Dialog).with_id("dialog"));
        let name = dom
            .insert_child(dialog, NodeData::new(Role::TextInput).with_id("name"))
            .unwrap();
        let group = dom
            .insert_child(dialog, NodeData::new(Role::Generic).visible(false))
            .unwrap();
        dom.insert_child(group, NodeData::new(Role::Button).with_id("hidden-btn"));
        let card = dom
            .insert_child(dialog, NodeData::new(Role::Generic).with_id("card").tab_index(0))
            .unwrap();

        assert_eq!(dom.tabbable_within(dialog), vec![name, card]);
    }

    #[test]
    fn tabbable_within_excludes_container() {
        let mut dom = Dom::new();
        let panel = dom.insert(NodeData::new(Role::Button));
        assert!(dom.tabbable_within(panel).is_empty());
    }

    #[test]
    fn query_by_id() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region));
        let save = dom
            .insert_child(root, NodeData::new(Role::Button).with_id("save"))
            .unwrap();
        assert_eq!(dom.query_by_id("save"), Some(save));
        assert_eq!(dom.query_by_id("missing"), None);
    }

    #[test]
    fn query_within_preserves_order() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Listbox));
        let a = dom.insert_child(root, NodeData::new(Role::ListOption)).unwrap();
        let b = dom
            .insert_child(root, NodeData::new(Role::ListOption).disabled(true))
            .unwrap();
        let c = dom.insert_child(root, NodeData::new(Role::ListOption)).unwrap();
        assert_eq!(dom.query_within(root, |d| d.role == Role::ListOption), vec![a, b, c]);
        assert_eq!(dom.query_within(root, |d| d.disabled), vec![b]);
    }
}
