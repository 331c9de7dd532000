//! # uikit-core
//!
//! Headless interactive primitives for accessible widgets: controlled state,
//! focus traps, keyboard list navigation, delayed disclosure and toggles,
//! composed into modal, select, tooltip, toast, checkbox/switch, accordion
//! and tabs widgets over a retained document.
//!
//! Nothing here draws. Widgets mount nodes into a shared
//! [`Document`](document::Document), react to targeted
//! [`UiEvent`](event::UiEvent)s and virtual-clock timers, and expose their
//! state for a renderer (or a test) to read back.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed node arena with roles, tab indices and queries
//! - **[`document`]**: Focus, native tab order, document listeners, scroll lock
//! - **[`event`]**: Keys (from crossterm), targeted UI events, keymaps
//! - **[`timer`]**: Cancellable single-shot timers on a virtual clock
//! - **[`state`]**: Controlled/uncontrolled value reconciliation
//! - **[`primitives`]**: Disclosure, auto-dismiss, focus trap, list navigation, toggle
//! - **[`context`]**: Provider/consumer scopes for compound widgets
//! - **[`widget`]**: Component trait and lifecycle tracking
//! - **[`widgets`]**: Modal, Select, Tooltip, Toast, Checkbox/Switch, Accordion, Tabs
//! - **[`app`]**: `Ui` context, configuration, component host, tokio timer loop
//! - **[`testing`]**: Headless `Pilot` and document outlines for snapshots

// Foundation
pub mod dom;
pub mod document;
pub mod timer;

// Interaction
pub mod event;
pub mod state;
pub mod primitives;
pub mod context;

// Widget system
pub mod widget;
pub mod widgets;

// Application
pub mod app;

// Testing
pub mod testing;
