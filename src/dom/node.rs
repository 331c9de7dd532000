//! Node types: NodeId, Role, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Semantic role of a node, mirroring the element kinds that matter for
/// keyboard interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Generic,
    Button,
    Link,
    TextInput,
    Select,
    TextArea,
    Checkbox,
    Switch,
    Tab,
    TabPanel,
    Listbox,
    ListOption,
    Dialog,
    Overlay,
    Tooltip,
    Status,
    Region,
}

impl Role {
    /// Whether an element of this role takes part in tab order without an
    /// explicit tab index (buttons, links, form controls).
    pub fn is_natively_focusable(self) -> bool {
        matches!(
            self,
            Role::Button
                | Role::Link
                | Role::TextInput
                | Role::Select
                | Role::TextArea
                | Role::Checkbox
                | Role::Switch
                | Role::Tab
        )
    }

    /// Lowercase name used in outlines and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Generic => "generic",
            Role::Button => "button",
            Role::Link => "link",
            Role::TextInput => "textbox",
            Role::Select => "combobox",
            Role::TextArea => "textarea",
            Role::Checkbox => "checkbox",
            Role::Switch => "switch",
            Role::Tab => "tab",
            Role::TabPanel => "tabpanel",
            Role::Listbox => "listbox",
            Role::ListOption => "option",
            Role::Dialog => "dialog",
            Role::Overlay => "overlay",
            Role::Tooltip => "tooltip",
            Role::Status => "status",
            Role::Region => "region",
        }
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Data associated with a single DOM node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Semantic role.
    pub role: Role,
    /// Optional unique id (`#id` lookups).
    pub id: Option<String>,
    /// Accessible label / text content.
    pub label: String,
    /// Explicit tab index. `None` falls back to the role's native behaviour,
    /// negative values remove the node from tab order.
    pub tab_index: Option<i32>,
    /// Whether this node is visible.
    pub visible: bool,
    /// Whether this node is disabled.
    pub disabled: bool,
}

impl NodeData {
    /// Create a new `NodeData` with the given role and sensible defaults.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            id: None,
            label: String::new(),
            tab_index: None,
            visible: true,
            disabled: false,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set an explicit tab index (builder).
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Set whether this node is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether this node is visible (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Whether this node participates in sequential (Tab) focus navigation.
    pub fn is_tabbable(&self) -> bool {
        if !self.visible || self.disabled {
            return false;
        }
        match self.tab_index {
            Some(index) => index >= 0,
            None => self.role.is_natively_focusable(),
        }
    }
}
