//! Stateful interaction primitives composed by the widgets.
//!
//! - [`DelayedDisclosure`]: show after a delay, hide on leave (tooltip).
//! - [`AutoDismiss`]: single-shot dismissal countdown (toast).
//! - [`FocusTrap`]: confine Tab to a container and restore focus (modal).
//! - [`ListNavigator`]: open/highlight/commit over a list (select).
//! - [`TogglePrimitive`]: checked state with click and key activation.

pub mod auto_dismiss;
pub mod disclosure;
pub mod focus_trap;
pub mod list_nav;
pub mod toggle;

pub use auto_dismiss::AutoDismiss;
pub use disclosure::{DelayedDisclosure, DisclosurePhase, DisclosureState};
pub use focus_trap::{FocusTrap, FocusTrapState, TrapOutcome};
pub use list_nav::{step_enabled, Direction, ListNavigationState, ListNavigator, ListOption};
pub use toggle::TogglePrimitive;
