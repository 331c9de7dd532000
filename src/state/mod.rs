//! Widget state helpers.

pub mod controlled;

pub use controlled::{ChangeHandler, ControlledValue, EffectiveValue};
