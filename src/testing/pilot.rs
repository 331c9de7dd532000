//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` owns an [`App`] and simulates user input against it: key
//! presses aimed at the focused node, clicks and hovers on nodes, and virtual
//! time passing.

use std::time::Duration;

use crate::app::{App, Ui, UiConfig};
use crate::context::ContextError;
use crate::document::Document;
use crate::dom::NodeId;
use crate::event::{EventResult, Key, KeyEvent, Modifiers, UiEvent};
use crate::widget::{Component, ComponentId};

use super::snapshot;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use uikit_core::testing::Pilot;
/// use uikit_core::widgets::{ToggleConfig, ToggleControl};
///
/// let mut pilot = Pilot::new();
/// let id = pilot
///     .mount(|ui| ToggleControl::mount(ui, None, ToggleConfig::checkbox("Accept")))
///     .unwrap();
/// let node = pilot.component::<ToggleControl>(id).unwrap().node();
/// pilot.click(node);
/// assert!(pilot.component::<ToggleControl>(id).unwrap().is_checked());
/// ```
#[derive(Default)]
pub struct Pilot {
    app: App,
}

impl Pilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            app: App::with_config(config),
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Build a component against the shared `Ui` and hand it to the app.
    pub fn mount<C, F>(&mut self, build: F) -> Result<ComponentId, ContextError>
    where
        C: Component + 'static,
        F: FnOnce(&mut Ui) -> Result<C, ContextError>,
    {
        let component = build(&mut self.app.ui)?;
        Ok(self.app.mount(component))
    }

    pub fn unmount(&mut self, id: ComponentId) -> bool {
        self.app.unmount(id)
    }

    pub fn component<T: Component + 'static>(&self, id: ComponentId) -> Option<&T> {
        self.app.get(id)
    }

    pub fn component_mut<T: Component + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.app.get_mut(id)
    }

    /// Run `f` with a component and the `Ui`, as a caller re-rendering it
    /// with new props would.
    pub fn with<T: Component + 'static, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut T, &mut Ui) -> R,
    ) -> Option<R> {
        self.app.with(id, f)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Press a key on the focused node.
    pub fn press(&mut self, key: Key) -> EventResult {
        self.press_with(key, Modifiers::NONE)
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) -> EventResult {
        let target = self.app.ui.document.active_element();
        self.app.dispatch(UiEvent::Key {
            target,
            key: KeyEvent::new(key, modifiers),
        })
    }

    pub fn tab(&mut self) -> EventResult {
        self.press(Key::Tab)
    }

    pub fn shift_tab(&mut self) -> EventResult {
        self.press_with(Key::Tab, Modifiers::SHIFT)
    }

    pub fn click(&mut self, node: NodeId) -> EventResult {
        self.app.dispatch(UiEvent::Click { target: node })
    }

    pub fn hover(&mut self, node: NodeId) -> EventResult {
        self.app.dispatch(UiEvent::PointerEnter { target: node })
    }

    pub fn unhover(&mut self, node: NodeId) -> EventResult {
        self.app.dispatch(UiEvent::PointerLeave { target: node })
    }

    /// Focus a node programmatically.
    pub fn focus(&mut self, node: NodeId) -> bool {
        self.app.focus(node)
    }

    // ── Time ─────────────────────────────────────────────────────────

    pub fn advance(&mut self, by: Duration) {
        self.app.advance(by);
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.app.ui.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.app.ui.document
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.app.ui.document.active_element()
    }

    pub fn pending_timers(&self) -> usize {
        self.app.ui.timers.pending_count()
    }

    /// Text outline of the whole document.
    pub fn outline(&self) -> String {
        snapshot::outline(&self.app.ui.document)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

// ===========================================================================
// Tests
// ===========================================================================
