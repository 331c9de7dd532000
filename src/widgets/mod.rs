//! Headless widgets composed from the interaction primitives.
//!
//! Every widget mounts its nodes into the shared [`Document`](crate::document::Document)
//! through a `mount` constructor and implements [`Component`](crate::widget::Component)
//! so an [`App`](crate::app::App) can route events and timers to it.

pub mod accordion;
pub mod modal;
pub mod select;
pub mod tabs;
pub mod toast;
pub mod toggle;
pub mod tooltip;

pub use accordion::{
    Accordion, AccordionConfig, AccordionContent, AccordionItem, AccordionKind, AccordionTrigger,
};
pub use modal::{Modal, ModalConfig};
pub use select::{Select, SelectConfig};
pub use tabs::{Tab, TabPanel, Tabs, TabsConfig};
pub use toast::{Toast, ToastConfig};
pub use toggle::{ToggleConfig, ToggleControl, ToggleKind};
pub use tooltip::{Position, Tooltip, TooltipConfig};

use crate::context::ContextError;
use crate::document::Document;
use crate::dom::{NodeData, NodeId};

/// Insert `data` under `parent`, or as a new top-level node.
pub(crate) fn attach(
    doc: &mut Document,
    parent: Option<NodeId>,
    data: NodeData,
    component: &'static str,
) -> Result<NodeId, ContextError> {
    match parent {
        Some(parent) => doc
            .append_child(parent, data)
            .ok_or(ContextError::DetachedParent { component }),
        None => Ok(doc.append(data)),
    }
}

/// Callback with no arguments (close notifications).
pub type Callback = Box<dyn FnMut()>;
