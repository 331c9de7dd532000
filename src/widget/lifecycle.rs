//! Component lifecycle: mount and unmount bookkeeping.
//!
//! The `LifecycleTracker` records which components are currently mounted and
//! accumulates lifecycle events that can be drained by the owner.

use std::collections::HashSet;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a component mounted in an [`App`](crate::app::App).
    pub struct ComponentId;
}

/// Events that occur during the component lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Mount { id: ComponentId },
    Unmount { id: ComponentId },
}

/// Tracks mounted components and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    mounted: HashSet<ComponentId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mount. Mounting twice produces no duplicate event.
    pub fn on_mount(&mut self, id: ComponentId) {
        if self.mounted.insert(id) {
            self.pending.push(LifecycleEvent::Mount { id });
        }
    }

    /// Record an unmount. Unknown ids produce no spurious event.
    pub fn on_unmount(&mut self, id: ComponentId) {
        if self.mounted.remove(&id) {
            self.pending.push(LifecycleEvent::Unmount { id });
        }
    }

    pub fn is_mounted(&self, id: ComponentId) -> bool {
        self.mounted.contains(&id)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ComponentId> {
        let mut sm: SlotMap<ComponentId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn mount_then_unmount() {
        let id = ids(1)[0];
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(id);
        assert!(tracker.is_mounted(id));
        tracker.on_unmount(id);
        assert!(!tracker.is_mounted(id));
        assert_eq!(
            tracker.pending_events(),
            vec![LifecycleEvent::Mount { id }, LifecycleEvent::Unmount { id }]
        );
        assert!(!tracker.has_pending());
    }

    #[test]
    fn duplicate_and_unknown_are_ignored() {
        let v = ids(2);
        let mut tracker = LifecycleTracker::new();
        tracker.on_mount(v[0]);
        tracker.on_mount(v[0]);
        tracker.on_unmount(v[1]);
        assert_eq!(tracker.mounted_count(), 1);
        assert_eq!(tracker.pending_events().len(), 1);
    }
}
