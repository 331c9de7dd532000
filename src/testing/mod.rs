//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) with simulated
//! input and virtual time. Use [`outline`] to capture the document as plain
//! text for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{describe, outline, outline_of};
