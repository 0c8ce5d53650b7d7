//! Adapter for date/time picker widgets.

use std::rc::Rc;

use adminui_rs_dom::Element;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

/// Attribute carrying the widget's JSON configuration.
pub const CONFIG_ATTRIBUTE: &str = "data-bootstrapui-datetimepicker";

const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Configuration of a date picker: the display format shown to the user and
/// the export format written into the hidden submit field. Both are chrono
/// format strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatePickerConfiguration {
    /// Format of the visible input.
    pub format: String,
    /// Format of the hidden export field.
    pub export_format: String,
}

impl Default for DatePickerConfiguration {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            export_format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Wraps a date picker: a visible text input plus a hidden field carrying
/// the export-formatted value the server receives.
///
/// Always holds exactly one value: the visible text as label and the hidden
/// export value as value. Clearing the control yields empty strings for
/// both.
#[derive(Debug)]
pub struct DatePickerControlAdapter {
    target: Element,
    visible: Element,
    hidden: Element,
    configuration: DatePickerConfiguration,
    initial_visible: String,
    initial_hidden: String,
    observers: AdapterObservers,
}

impl DatePickerControlAdapter {
    /// Builds the adapter around the picker wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`ControlAdapterError::MissingControl`] when the visible or
    /// hidden input is absent, or
    /// [`ControlAdapterError::InvalidConfiguration`] for malformed JSON in
    /// [`CONFIG_ATTRIBUTE`].
    pub fn attach(element: &Element) -> Result<Rc<Self>, ControlAdapterError> {
        let configuration = match element.attribute(CONFIG_ATTRIBUTE) {
            Some(json) => serde_json::from_str(&json)?,
            None => DatePickerConfiguration::default(),
        };
        let visible = element
            .find_first(|el| el.tag() == "input" && el.attribute("type").as_deref() != Some("hidden"))
            .ok_or(ControlAdapterError::MissingControl("input"))?;
        let hidden = element
            .find_first(|el| el.attribute("type").as_deref() == Some("hidden"))
            .ok_or(ControlAdapterError::MissingControl("hidden input"))?;

        let adapter = Rc::new(Self {
            target: element.clone(),
            visible: visible.clone(),
            hidden: hidden.clone(),
            configuration,
            initial_visible: visible.value(),
            initial_hidden: hidden.value(),
            observers: AdapterObservers::new(),
        });

        let weak = Rc::downgrade(&adapter);
        visible.add_event_listener(
            "change",
            DOM_LISTENER_ID,
            Rc::new(move |_| {
                if let Some(adapter) = weak.upgrade() {
                    adapter.sync_hidden_from_visible();
                    adapter.trigger_change();
                }
            }),
        );

        Ok(adapter)
    }

    /// Returns the active configuration.
    pub const fn configuration(&self) -> &DatePickerConfiguration {
        &self.configuration
    }

    /// Re-derives the hidden export value from the visible text. Text that
    /// does not match the display format clears the export value.
    fn sync_hidden_from_visible(&self) {
        let text = self.visible.value();
        match parse_with(&text, &self.configuration.format) {
            Ok(moment) if !text.is_empty() => {
                self.hidden
                    .set_value(moment.format(&self.configuration.export_format).to_string());
            }
            _ => self.hidden.set_value(""),
        }
    }
}

fn parse_with(text: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, format)
        .or_else(|err| {
            NaiveDate::parse_from_str(text, format)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| err)
        })
}

impl ControlAdapter for DatePickerControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        vec![ControlValueHolder::new(
            Some(self.visible.value()),
            self.hidden.value(),
            self.target.clone(),
        )]
    }

    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError> {
        let SelectableValue::Text(text) = value else {
            return Err(ControlAdapterError::InvalidValue {
                expected: "text",
                received: value.variant_name(),
            });
        };
        if text.is_empty() {
            self.visible.set_value("");
            self.hidden.set_value("");
            return Ok(());
        }

        let moment = parse_with(&text, &self.configuration.export_format)?;
        self.visible
            .set_value(moment.format(&self.configuration.format).to_string());
        self.hidden
            .set_value(moment.format(&self.configuration.export_format).to_string());
        Ok(())
    }

    fn reset(&self) {
        self.visible.set_value(self.initial_visible.clone());
        self.hidden.set_value(self.initial_hidden.clone());
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
