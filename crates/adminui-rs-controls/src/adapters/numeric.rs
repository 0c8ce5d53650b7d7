//! Adapter for formatted numeric inputs.

use std::rc::Rc;

use adminui_rs_dom::Element;
use serde::Deserialize;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::{impl_adapter_observers, DOM_LISTENER_ID};
use crate::events::AdapterObservers;

/// Attribute carrying the widget's JSON configuration,
/// e.g. `data-bootstrapui-numeric='{"multiplier":100}'`.
pub const CONFIG_ATTRIBUTE: &str = "data-bootstrapui-numeric";

/// Configuration of a numeric control.
///
/// The visible control shows `raw * multiplier` with a fixed number of
/// decimals (a multiplier of 100 turns the raw fraction `0.5` into the
/// displayed `50.00`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumericConfiguration {
    /// Factor between the raw value and the displayed value.
    pub multiplier: f64,
    /// Number of decimals in the displayed value.
    pub decimal_places: u32,
}

impl Default for NumericConfiguration {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            decimal_places: 2,
        }
    }
}

/// Wraps a numeric input. Always holds exactly one value: the formatted
/// display text as label and the raw numeric string as value.
///
/// When the visible control's name starts with `_`, a hidden field with the
/// unprefixed name inside the same form carries the raw value and is kept
/// in sync on every write.
#[derive(Debug)]
pub struct NumericControlAdapter {
    target: Element,
    configuration: NumericConfiguration,
    initial_value: String,
    observers: AdapterObservers,
}

impl NumericControlAdapter {
    /// Builds the adapter, reading the configuration from
    /// [`CONFIG_ATTRIBUTE`] when present.
    ///
    /// # Errors
    ///
    /// Returns [`ControlAdapterError::InvalidConfiguration`] when the
    /// attribute holds malformed JSON.
    pub fn attach(element: &Element) -> Result<Rc<Self>, ControlAdapterError> {
        let configuration = match element.attribute(CONFIG_ATTRIBUTE) {
            Some(json) => serde_json::from_str(&json)?,
            None => NumericConfiguration::default(),
        };

        let adapter = Rc::new(Self {
            target: element.clone(),
            configuration,
            initial_value: element.value(),
            observers: AdapterObservers::new(),
        });
        adapter.sync_hidden_field();

        let weak = Rc::downgrade(&adapter);
        element.add_event_listener(
            "change",
            DOM_LISTENER_ID,
            Rc::new(move |_| {
                if let Some(adapter) = weak.upgrade() {
                    adapter.sync_hidden_field();
                    adapter.trigger_change();
                }
            }),
        );

        Ok(adapter)
    }

    /// Returns the active configuration.
    pub const fn configuration(&self) -> &NumericConfiguration {
        &self.configuration
    }

    /// Parses the displayed text back to the raw value. Grouping commas in
    /// the display are tolerated.
    fn raw_value(&self) -> Option<f64> {
        let display: f64 = self.target.value().replace(',', "").parse().ok()?;
        Some(display / self.configuration.multiplier)
    }

    fn format_display(&self, raw: f64) -> String {
        let display = raw * self.configuration.multiplier;
        format!(
            "{display:.precision$}",
            precision = self.configuration.decimal_places as usize
        )
    }

    fn sync_hidden_field(&self) {
        let Some(name) = self.target.attribute("name") else {
            return;
        };
        let Some(unprefixed) = name.strip_prefix('_') else {
            return;
        };
        let Some(form) = self.target.closest(|el| el.tag() == "form") else {
            return;
        };
        let hidden = form.find_first(|el| {
            el.attribute("name").as_deref() == Some(unprefixed) && el != &self.target
        });
        if let Some(hidden) = hidden {
            let raw = self
                .raw_value()
                .map(|value| value.to_string())
                .unwrap_or_default();
            hidden.set_value(raw);
        }
    }
}

impl ControlAdapter for NumericControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        let display = self.target.value();
        let value = self
            .raw_value()
            .map_or_else(|| display.clone(), |raw| raw.to_string());
        vec![ControlValueHolder::new(
            Some(display),
            value,
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
            self.target.set_value("");
        } else {
            let raw: f64 = text.parse()?;
            self.target.set_value(self.format_display(raw));
        }
        self.sync_hidden_field();
        Ok(())
    }

    fn reset(&self) {
        self.target.set_value(self.initial_value.clone());
        self.sync_hidden_field();
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
