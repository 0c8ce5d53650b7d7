//! Adapter for native single- and multi-select controls.

use std::rc::Rc;

use adminui_rs_dom::Element;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

/// Wraps a `<select>`.
///
/// A multi-select holds one value per selected option, in document order.
/// A single select always holds exactly one value: the selected option, or
/// an empty label/value pair when nothing is selected. The option's text is
/// the label and the option element itself is the holder's context.
#[derive(Debug)]
pub struct SelectControlAdapter {
    target: Element,
    multiple: bool,
    initial_selection: Vec<Element>,
    initial_value: String,
    observers: AdapterObservers,
}

impl SelectControlAdapter {
    /// Builds the adapter and wires its DOM listeners.
    pub fn attach(element: &Element) -> Rc<Self> {
        let adapter = Rc::new(Self {
            target: element.clone(),
            multiple: element.attribute("multiple").is_some(),
            initial_selection: options_of(element)
                .into_iter()
                .filter(Element::is_selected)
                .collect(),
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

        adapter
    }

    /// Returns `true` when the control allows multiple selections.
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }
}

fn options_of(element: &Element) -> Vec<Element> {
    element.find_all(|el| el.tag() == "option")
}

fn option_value(option: &Element) -> String {
    option.attribute("value").unwrap_or_else(|| option.text())
}

fn holder_for(option: &Element) -> ControlValueHolder {
    ControlValueHolder::new(Some(option.text()), option_value(option), option.clone())
}

impl ControlAdapter for SelectControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        let selected: Vec<Element> = options_of(&self.target)
            .into_iter()
            .filter(Element::is_selected)
            .collect();

        if self.multiple {
            return selected.iter().map(holder_for).collect();
        }
        selected.first().map_or_else(
            || {
                vec![ControlValueHolder::new(
                    Some(String::new()),
                    "",
                    self.target.clone(),
                )]
            },
            |option| vec![holder_for(option)],
        )
    }

    /// Selects the option whose value matches. On a single select all other
    /// options are deselected; on a multi-select the matching option is
    /// added to the selection.
    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        let SelectableValue::Text(text) = value else {
            return Err(ControlAdapterError::InvalidValue {
                expected: "text",
                received: value.variant_name(),
            });
        };

        for option in options_of(&self.target) {
            let matches = option_value(&option) == text;
            if matches {
                option.set_selected(true);
            } else if !self.multiple {
                option.set_selected(false);
            }
        }
        self.target.set_value(text);
        Ok(())
    }

    fn reset(&self) {
        for option in options_of(&self.target) {
            option.set_selected(self.initial_selection.contains(&option));
        }
        self.target.set_value(self.initial_value.clone());
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
