//! Component trait: event, timer and unmount hooks.
//!
//! Every widget that wants to live inside an [`App`](crate::app::App)
//! implements [`Component`]. The trait is object-safe so the app can hold a
//! heterogeneous list of mounted widgets and downcast them for inspection.

use std::any::Any;

use crate::app::Ui;
use crate::dom::NodeId;
use crate::event::{EventResult, UiEvent};
use crate::timer::TimerId;

/// Core trait implemented by all widgets.
pub trait Component {
    /// Widget name for logs (e.g. "Select", "Modal").
    fn name(&self) -> &str;

    /// Outermost node owned by this component.
    fn root(&self) -> NodeId;

    /// Offer an event. Pointer events reach every component, key events stop
    /// at the first one that reports [`EventResult::Handled`].
    fn handle_event(&mut self, ui: &mut Ui, event: &UiEvent) -> EventResult;

    /// A timer fired. Returns `true` if it belonged to this component.
    fn on_timer(&mut self, _ui: &mut Ui, _timer: TimerId) -> bool {
        false
    }

    /// Tear down: cancel timers, drop document listeners, detach nodes.
    fn unmount(&mut self, ui: &mut Ui);

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{NodeData, Role};

    struct Counter {
        node: NodeId,
        clicks: usize,
    }

    impl Component for Counter {
        fn name(&self) -> &str {
            "Counter"
        }

        fn root(&self) -> NodeId {
            self.node
        }

        fn handle_event(&mut self, _ui: &mut Ui, event: &UiEvent) -> EventResult {
            match event {
                UiEvent::Click { target } if *target == self.node => {
                    self.clicks += 1;
                    EventResult::Handled
                }
                _ => EventResult::Ignored,
            }
        }

        fn unmount(&mut self, ui: &mut Ui) {
            ui.document.remove(self.node);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn object_safe_dispatch_and_downcast() {
        let mut ui = Ui::new();
        let node = ui.document.append(NodeData::new(Role::Button));
        let mut boxed: Box<dyn Component> = Box::new(Counter { node, clicks: 0 });

        let result = boxed.handle_event(&mut ui, &UiEvent::Click { target: node });
        assert!(result.is_handled());
        let timer = ui.timers.schedule(Default::default(), "x");
        assert!(!boxed.on_timer(&mut ui, timer));

        let counter = boxed.as_any().downcast_ref::<Counter>().unwrap();
        assert_eq!(counter.clicks, 1);
        assert_eq!(boxed.name(), "Counter");

        boxed.unmount(&mut ui);
        assert!(!ui.document.contains(node));
    }
}
