//! Adapter for typeahead autosuggest widgets.

use std::rc::Rc;

use adminui_rs_dom::Element;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

/// Wraps an autosuggest widget: a typeahead text input (class
/// `js-typeahead`) paired with a hidden value field (class
/// `js-typeahead-value`).
///
/// Always holds exactly one value: the typed text as label, the committed
/// suggestion value as value. Opening the suggestion list invalidates the
/// previously committed value: the hidden field is cleared (the label is
/// kept) and exactly one change is fired.
#[derive(Debug)]
pub struct AutosuggestControlAdapter {
    target: Element,
    typeahead: Element,
    value_field: Element,
    initial_label: String,
    initial_value: String,
    observers: AdapterObservers,
}

impl AutosuggestControlAdapter {
    /// Builds the adapter around the widget wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`ControlAdapterError::MissingControl`] when the typeahead
    /// input or the hidden value field is absent.
    pub fn attach(element: &Element) -> Result<Rc<Self>, ControlAdapterError> {
        let typeahead = element
            .find_first(|el| el.has_class("js-typeahead"))
            .ok_or(ControlAdapterError::MissingControl("js-typeahead"))?;
        let value_field = element
            .find_first(|el| el.has_class("js-typeahead-value"))
            .ok_or(ControlAdapterError::MissingControl("js-typeahead-value"))?;

        let adapter = Rc::new(Self {
            target: element.clone(),
            typeahead: typeahead.clone(),
            value_field: value_field.clone(),
            initial_label: typeahead.value(),
            initial_value: value_field.value(),
            observers: AdapterObservers::new(),
        });

        let weak = Rc::downgrade(&adapter);
        typeahead.add_event_listener(
            "typeahead:open",
            DOM_LISTENER_ID,
            Rc::new(move |_| {
                if let Some(adapter) = weak.upgrade() {
                    adapter.value_field.set_value("");
                    adapter.trigger_change();
                }
            }),
        );
        for event_type in ["typeahead:change", "typeahead:select"] {
            let weak = Rc::downgrade(&adapter);
            typeahead.add_event_listener(
                event_type,
                DOM_LISTENER_ID,
                Rc::new(move |_| {
                    if let Some(adapter) = weak.upgrade() {
                        adapter.trigger_change();
                    }
                }),
            );
        }

        Ok(adapter)
    }
}

impl ControlAdapter for AutosuggestControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        vec![ControlValueHolder::new(
            Some(self.typeahead.value()),
            self.value_field.value(),
            self.target.clone(),
        )]
    }

    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        match value {
            SelectableValue::Suggestion { label, value } => {
                self.typeahead.set_value(label);
                self.value_field.set_value(value);
                Ok(())
            }
            other => Err(ControlAdapterError::InvalidValue {
                expected: "suggestion",
                received: other.variant_name(),
            }),
        }
    }

    fn reset(&self) {
        self.typeahead.set_value(self.initial_label.clone());
        self.value_field.set_value(self.initial_value.clone());
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
