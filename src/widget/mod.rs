//! Component system: trait and lifecycle.

pub mod traits;
pub mod lifecycle;

pub use traits::Component;
pub use lifecycle::{ComponentId, LifecycleEvent, LifecycleTracker};
