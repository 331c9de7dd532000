//! Controlled/uncontrolled value reconciliation.
//!
//! Every stateful widget stores its value in a [`ControlledValue`]. When the
//! owner supplies a value the widget is *controlled*: the owner is the source
//! of truth, and the widget only reports requested changes through the
//! callback. Otherwise the widget keeps an internal value seeded from the
//! default.

use std::fmt;

use tracing::trace;

/// Change notification callback.
pub type ChangeHandler<T> = Box<dyn FnMut(&T)>;

/// Snapshot of a reconciled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveValue<T> {
    pub value: T,
    pub is_controlled: bool,
}

/// A value that is either owned by the caller (controlled) or by the widget.
pub struct ControlledValue<T> {
    prop: Option<T>,
    internal: T,
    on_change: Option<ChangeHandler<T>>,
}

impl<T: Clone> ControlledValue<T> {
    /// Reconcile an optional caller-supplied value with a default.
    ///
    /// The default seeds the internal value exactly once, here.
    pub fn new(prop: Option<T>, default: T) -> Self {
        Self {
            prop,
            internal: default,
            on_change: None,
        }
    }

    /// Self-managed value starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self::new(None, default)
    }

    /// Caller-managed value. The internal fallback starts at `value` too.
    pub fn controlled(value: T) -> Self {
        Self::new(Some(value.clone()), value)
    }

    /// Attach a change callback (builder).
    pub fn with_on_change(mut self, on_change: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Replace the change callback.
    pub fn set_on_change(&mut self, on_change: Option<ChangeHandler<T>>) {
        self.on_change = on_change;
    }

    /// The effective value: the caller's when controlled, else internal.
    pub fn get(&self) -> &T {
        self.prop.as_ref().unwrap_or(&self.internal)
    }

    /// Whether the caller currently owns the value.
    pub fn is_controlled(&self) -> bool {
        self.prop.is_some()
    }

    /// Snapshot of the effective value and its mode.
    pub fn effective(&self) -> EffectiveValue<T> {
        EffectiveValue {
            value: self.get().clone(),
            is_controlled: self.is_controlled(),
        }
    }

    /// Request a new value.
    ///
    /// Uncontrolled: stores it. Controlled: stores nothing. The callback
    /// fires in both modes.
    pub fn set(&mut self, value: T) {
        if self.prop.is_none() {
            self.internal = value.clone();
        }
        trace!(controlled = self.prop.is_some(), "value change requested");
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&value);
        }
    }

    /// Request a value derived from the current effective value.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Apply the caller's latest value, as on a re-render with new props.
    ///
    /// `Some` takes effect immediately, including the switch from
    /// uncontrolled to controlled. `None` hands control back to the internal
    /// value, which controlled mode never touched.
    pub fn sync(&mut self, prop: Option<T>) {
        self.prop = prop;
    }
}

impl<T: fmt::Debug> fmt::Debug for ControlledValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlledValue")
            .field("prop", &self.prop)
            .field("internal", &self.internal)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
