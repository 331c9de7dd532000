//! Node arena: slotmap-backed tree with roles, tab order, and subtree queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId, Role};
pub use tree::Dom;
