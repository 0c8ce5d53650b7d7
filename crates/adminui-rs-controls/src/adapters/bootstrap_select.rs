//! Adapter for the bootstrap-select picker widget.

use std::rc::Rc;

use adminui_rs_dom::Element;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::impl_adapter_observers;
use crate::adapters::select::SelectControlAdapter;
use crate::events::AdapterObservers;

const PLACEHOLDER: &str = "Nothing selected";
const LISTENER_ID: &str = "adminui.adapter.bootstrap-select";

/// Wraps a bootstrap-select widget: a rendered button/picker on top of an
/// inner native `<select>`.
///
/// The value contract is the same as [`SelectControlAdapter`]'s; every
/// write additionally refreshes the rendered button text so the picker
/// stays in sync with the underlying select.
#[derive(Debug)]
pub struct BootstrapSelectControlAdapter {
    target: Element,
    select: Element,
    button: Option<Element>,
    inner: Rc<SelectControlAdapter>,
    observers: AdapterObservers,
}

impl BootstrapSelectControlAdapter {
    /// Builds the adapter around the widget wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`ControlAdapterError::MissingControl`] when the wrapper has
    /// no inner `<select>`.
    pub fn attach(element: &Element) -> Result<Rc<Self>, ControlAdapterError> {
        let select = element
            .find_first(|el| el.tag() == "select")
            .ok_or(ControlAdapterError::MissingControl("select"))?;
        let button = element.find_first(|el| el.has_class("dropdown-toggle"));

        let adapter = Rc::new(Self {
            target: element.clone(),
            select: select.clone(),
            button,
            inner: SelectControlAdapter::attach(&select),
            observers: AdapterObservers::new(),
        });
        adapter.refresh();

        let weak = Rc::downgrade(&adapter);
        select.add_event_listener(
            "change",
            LISTENER_ID,
            Rc::new(move |_| {
                if let Some(adapter) = weak.upgrade() {
                    adapter.refresh();
                    adapter.trigger_change();
                }
            }),
        );

        Ok(adapter)
    }

    /// Rewrites the picker button text from the current selection.
    fn refresh(&self) {
        let Some(button) = &self.button else { return };
        let labels: Vec<String> = self
            .select
            .find_all(|el| el.tag() == "option" && el.is_selected())
            .iter()
            .map(Element::text)
            .collect();
        if labels.is_empty() {
            button.set_text(PLACEHOLDER);
        } else {
            button.set_text(labels.join(", "));
        }
    }
}

impl ControlAdapter for BootstrapSelectControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        self.inner.get_value()
    }

    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        self.inner.select_value(value)?;
        self.refresh();
        Ok(())
    }

    fn reset(&self) {
        self.inner.reset();
        self.refresh();
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
