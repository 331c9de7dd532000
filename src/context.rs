//! Provider/consumer context scoped to DOM subtrees.
//!
//! A compound widget (accordion, tabs) provides a context value on its root
//! node. Sub-components look it up through their ancestor chain at mount time
//! and refuse to mount without it.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::dom::{Dom, NodeId};

/// Usage errors raised when a sub-component is mounted in the wrong place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("`{component}` must be mounted inside `{provider}`")]
    MissingProvider {
        component: &'static str,
        provider: &'static str,
    },
    #[error("`{component}` was mounted under a node that is not attached to the document")]
    DetachedParent { component: &'static str },
}

/// Context values keyed by providing node and value type.
#[derive(Default)]
pub struct ContextMap {
    entries: SecondaryMap<NodeId, HashMap<TypeId, Box<dyn Any>>>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide `value` to the subtree rooted at `node`, replacing any value
    /// of the same type already provided there.
    pub fn provide<T: 'static>(&mut self, node: NodeId, value: T) {
        if !self.entries.contains_key(node) {
            self.entries.insert(node, HashMap::new());
        }
        if let Some(map) = self.entries.get_mut(node) {
            map.insert(TypeId::of::<T>(), Box::new(value));
        }
    }

    /// Nearest value of type `T` provided at `node` or above, along with the
    /// providing node.
    pub fn lookup<T: 'static>(&self, dom: &Dom, node: NodeId) -> Option<(NodeId, &T)> {
        std::iter::once(node)
            .chain(dom.ancestors(node))
            .find_map(|id| {
                self.entries
                    .get(id)
                    .and_then(|map| map.get(&TypeId::of::<T>()))
                    .and_then(|value| value.downcast_ref::<T>())
                    .map(|value| (id, value))
            })
    }

    /// Like [`lookup`](Self::lookup), but a missing provider is a usage error.
    pub fn require<T: 'static>(
        &self,
        dom: &Dom,
        node: NodeId,
        component: &'static str,
        provider: &'static str,
    ) -> Result<(NodeId, &T), ContextError> {
        if !dom.contains(node) {
            return Err(ContextError::DetachedParent { component });
        }
        self.lookup(dom, node)
            .ok_or(ContextError::MissingProvider { component, provider })
    }

    /// Drop everything provided at `node`.
    pub fn remove(&mut self, node: NodeId) {
        self.entries.remove(node);
    }

    /// Number of nodes currently providing at least one value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{NodeData, Role};

    #[derive(Debug, PartialEq)]
    struct Scope(&'static str);

    #[test]
    fn lookup_walks_ancestors() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region));
        let mid = dom.insert_child(root, NodeData::new(Role::Generic)).unwrap();
        let leaf = dom.insert_child(mid, NodeData::new(Role::Button)).unwrap();

        let mut contexts = ContextMap::new();
        contexts.provide(root, Scope("outer"));
        assert_eq!(contexts.lookup::<Scope>(&dom, leaf), Some((root, &Scope("outer"))));

        contexts.provide(mid, Scope("inner"));
        assert_eq!(contexts.lookup::<Scope>(&dom, leaf), Some((mid, &Scope("inner"))));
        assert_eq!(contexts.lookup::<u32>(&dom, leaf), None);
    }

    #[test]
    fn require_reports_missing_provider() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region));
        let contexts = ContextMap::new();

        let err = contexts
            .require::<Scope>(&dom, root, "AccordionTrigger", "Accordion")
            .unwrap_err();
        assert_eq!(
            err,
            ContextError::MissingProvider {
                component: "AccordionTrigger",
                provider: "Accordion",
            }
        );
        assert_eq!(
            err.to_string(),
            "`AccordionTrigger` must be mounted inside `Accordion`"
        );
    }

    #[test]
    fn require_rejects_detached_parent() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region));
        dom.remove(root);
        let contexts = ContextMap::new();
        assert_eq!(
            contexts.require::<Scope>(&dom, root, "Tab", "Tabs").unwrap_err(),
            ContextError::DetachedParent { component: "Tab" }
        );
    }

    #[test]
    fn remove_drops_values() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(Role::Region));
        let mut contexts = ContextMap::new();
        contexts.provide(root, Scope("x"));
        contexts.provide(root, 7u32);
        assert_eq!(contexts.len(), 1);
        contexts.remove(root);
        assert!(contexts.is_empty());
        assert!(contexts.lookup::<Scope>(&dom, root).is_none());
    }
}
