//! Adapter for checkboxes and radio buttons.

use std::rc::Rc;

use adminui_rs_dom::Element;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

const DEFAULT_VALUE: &str = "Yes";

/// Wraps a checkbox or radio button.
///
/// Unchecked controls hold no values at all; checked controls hold exactly
/// one, whose value is the `value` attribute (defaulting to `"Yes"`) and
/// whose label is the text of the wrapping label or of a `label[for]`
/// pointing at the control. An unlabeled control yields a holder without a
/// label.
pub struct CheckboxControlAdapter {
    target: Element,
    initial_checked: bool,
    observers: AdapterObservers,
}

impl CheckboxControlAdapter {
    /// Builds the adapter and wires its DOM listeners.
    pub fn attach(element: &Element) -> Rc<Self> {
        let adapter = Rc::new(Self {
            target: element.clone(),
            initial_checked: element.is_checked(),
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

        adapter
    }

    fn label(&self) -> Option<String> {
        if let Some(label) = self.target.closest(|el| el.tag() == "label") {
            let text = label.text();
            if !text.is_empty() {
                return Some(text);
            }
        }
        let id = self.target.attribute("id")?;
        let root = self.target.closest(|el| el.parent().is_none())?;
        let label = root.find_first(|el| {
            el.tag() == "label" && el.attribute("for").as_deref() == Some(id.as_str())
        })?;
        let text = label.text();
        (!text.is_empty()).then_some(text)
    }
}

impl ControlAdapter for CheckboxControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        if !self.target.is_checked() {
            return Vec::new();
        }
        let value = self
            .target
            .attribute("value")
            .unwrap_or_else(|| DEFAULT_VALUE.to_string());
        vec![ControlValueHolder::new(
            self.label(),
            value,
            self.target.clone(),
        )]
    }

    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        match value {
            SelectableValue::Checked(checked) => {
                self.target.set_checked(checked);
                Ok(())
            }
            other => Err(ControlAdapterError::InvalidValue {
                expected: "checked",
                received: other.variant_name(),
            }),
        }
    }

    fn reset(&self) {
        self.target.set_checked(self.initial_checked);
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
