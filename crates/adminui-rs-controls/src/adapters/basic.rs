//! Adapter for plain text inputs and textareas.

use std::rc::Rc;

use adminui_rs_dom::{Element, Event};

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

/// Wraps a single text control. Always holds exactly one value whose label
/// and value are both the current text. Pressing Enter in the control
/// signals submit intent.
pub struct BasicControlAdapter {
    target: Element,
    initial_value: String,
    observers: AdapterObservers,
}

impl BasicControlAdapter {
    /// Builds the adapter and wires its DOM listeners.
    pub fn attach(element: &Element) -> Rc<Self> {
        let adapter = Rc::new(Self {
            target: element.clone(),
            initial_value: element.value(),
            observers: AdapterObservers::new(),
        });

        let weak = Rc::downgrade(&adapter);
        element.add_event_listener(
            "change",
            DOM_LISTENER_ID,
            Rc::new(move |_| {
                if let Some(adapter) = weak.upgrade() {
                    adapter.trigger_change();
                }
            }),
        );

        let weak = Rc::downgrade(&adapter);
        element.add_event_listener(
            "keydown",
            DOM_LISTENER_ID,
            Rc::new(move |event: &Event| {
                if event.key().as_deref() == Some("Enter") {
                    if let Some(adapter) = weak.upgrade() {
                        adapter.trigger_submit();
                    }
                }
            }),
        );

        adapter
    }
}

impl ControlAdapter for BasicControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        let value = self.target.value();
        vec![ControlValueHolder::new(
            Some(value.clone()),
            value,
            self.target.clone(),
        )]
    }

    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        match value {
            SelectableValue::Text(text) => {
                self.target.set_value(text);
                Ok(())
            }
            other => Err(ControlAdapterError::InvalidValue {
                expected: "text",
                received: other.variant_name(),
            }),
        }
    }

    fn reset(&self) {
        self.target.set_value(self.initial_value.clone());
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn input_with(value: &str) -> Element {
        let element = Element::new("input").with_attribute("type", "text");
        element.set_value(value);
        element
    }

    #[test]
    fn test_one_holder_with_label_equal_to_value() {
        let adapter = BasicControlAdapter::attach(&input_with("hello"));
        let holders = adapter.get_value();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].label(), Some("hello"));
        assert_eq!(holders[0].value(), "hello");
    }

    #[test]
    fn test_select_value_writes_text() {
        let element = input_with("old");
        let adapter = BasicControlAdapter::attach(&element);
        adapter
            .select_value(SelectableValue::Text("new".to_string()))
            .unwrap();
        assert_eq!(element.value(), "new");
        assert!(adapter.select_value(SelectableValue::Checked(true)).is_err());
    }

    #[test]
    fn test_reset_restores_initial_value() {
        let element = input_with("initial");
        let adapter = BasicControlAdapter::attach(&element);
        element.set_value("changed");
        adapter.reset();
        assert_eq!(element.value(), "initial");
    }

    #[test]
    fn test_dom_change_fires_exactly_one_notification() {
        let element = input_with("");
        let adapter = BasicControlAdapter::attach(&element);
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        adapter.on_change("counter", Rc::new(move |_| seen.set(seen.get() + 1)));

        element.dispatch(&Event::new("change"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_enter_keydown_signals_submit() {
        let element = input_with("");
        let adapter = BasicControlAdapter::attach(&element);
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        adapter.on_submit("counter", Rc::new(move |_| seen.set(seen.get() + 1)));

        element.dispatch(&Event::new("keydown").with_key("a"));
        element.dispatch(&Event::new("keydown").with_key("Enter"));
        assert_eq!(hits.get(), 1);
    }
}
