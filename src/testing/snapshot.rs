//! Text outlines of the document for snapshot assertions.
//!
//! One line per node, indented two spaces per level:
//!
//! ```text
//! dialog "Edit" tabindex=-1
//!   button "Close" [focused]
//! ```
//!
//! Flags: `[hidden]` for a node whose own visibility is off, `[disabled]`,
//! and `[focused]` for the active element.

use std::fmt::Write;

use crate::document::Document;
use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Outline every top-level subtree, in document order.
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();
    for &root in doc.dom.roots() {
        write_node(doc, root, 0, &mut out);
    }
    trim_last_newline(out)
}

/// Outline the subtree rooted at `root`. Empty if the node is gone.
pub fn outline_of(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    if doc.contains(root) {
        write_node(doc, root, 0, &mut out);
    }
    trim_last_newline(out)
}

/// One outline line for a single node, without indentation.
pub fn describe(doc: &Document, id: NodeId) -> String {
    let Some(data) = doc.dom.get(id) else {
        return String::new();
    };
    let mut line = data.role.as_str().to_owned();
    if let Some(dom_id) = &data.id {
        let _ = write!(line, " #{dom_id}");
    }
    if !data.label.is_empty() {
        let _ = write!(line, " {:?}", data.label);
    }
    if let Some(index) = data.tab_index {
        let _ = write!(line, " tabindex={index}");
    }
    if !data.visible {
        line.push_str(" [hidden]");
    }
    if data.disabled {
        line.push_str(" [disabled]");
    }
    if doc.active_element() == Some(id) {
        line.push_str(" [focused]");
    }
    line
}

// ---------------------------------------------------------------------------
// Internal
// ---------------------------------------------------------------------------

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&describe(doc, id));
    out.push('\n');
    for &child in doc.dom.children(id) {
        write_node(doc, child, depth + 1, out);
    }
}

fn trim_last_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

// ===========================================================================
// Tests
// ===========================================================================
