//! The adapter contract: value holders, selectable values and the
//! [`ControlAdapter`] trait.

use adminui_rs_dom::Element;
use thiserror::Error;

use crate::events::AdapterListener;

/// Errors raised by control adapters.
#[derive(Debug, Error)]
pub enum ControlAdapterError {
    /// `select_value` was called on a container adapter.
    #[error("Select value is not supported on a container control adapter")]
    SelectNotSupported,

    /// A [`SelectableValue`] variant the adapter cannot apply.
    #[error("control adapter expected a {expected} value, got {received}")]
    InvalidValue {
        /// The variant the adapter accepts.
        expected: &'static str,
        /// A description of the variant that was passed.
        received: &'static str,
    },

    /// A required inner element was missing from the adapter's subtree.
    #[error("control adapter is missing its inner '{0}' control")]
    MissingControl(&'static str),

    /// The JSON configuration data attribute could not be parsed.
    #[error("invalid control configuration: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),

    /// A date string did not match the configured export format.
    #[error("invalid date value: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// A value meant for a numeric control could not be parsed as a number.
    #[error("invalid numeric value: {0}")]
    InvalidNumber(#[from] std::num::ParseFloatError),
}

/// A single value held by a control.
///
/// Holders are snapshots: each [`ControlAdapter::get_value`] call produces
/// fresh instances. The `context` is the element the value originates from
/// (an option, an input) and plays no part in equality of the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlValueHolder {
    label: Option<String>,
    value: String,
    context: Element,
}

impl ControlValueHolder {
    /// Creates a value holder.
    pub fn new(label: Option<String>, value: impl Into<String>, context: Element) -> Self {
        Self {
            label,
            value: value.into(),
            context,
        }
    }

    /// Returns the human-readable label, if the control has one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the raw value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the element this value originates from.
    pub const fn context(&self) -> &Element {
        &self.context
    }
}

/// A value that can be written into a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectableValue {
    /// Checked state, for checkboxes and radio buttons.
    Checked(bool),
    /// A plain textual or option value.
    Text(String),
    /// A suggestion with separate display label and submit value.
    Suggestion {
        /// The text shown to the user.
        label: String,
        /// The value submitted to the server.
        value: String,
    },
}

impl SelectableValue {
    pub(crate) const fn variant_name(&self) -> &'static str {
        match self {
            Self::Checked(_) => "checked",
            Self::Text(_) => "text",
            Self::Suggestion { .. } => "suggestion",
        }
    }
}

/// The uniform interface over a form widget.
///
/// Implementations wrap one DOM subtree and translate between widget
/// specifics and this contract. User-driven changes produce exactly one
/// change notification; programmatic writes via [`Self::select_value`] are
/// silent, callers decide whether to [`Self::trigger_change`] afterwards.
pub trait ControlAdapter {
    /// Returns the current value(s) as fresh holders, in document order.
    fn get_value(&self) -> Vec<ControlValueHolder>;

    /// Writes a value into the control.
    ///
    /// # Errors
    ///
    /// Returns [`ControlAdapterError::InvalidValue`] for a variant the
    /// adapter cannot apply, or an adapter-specific error for values it
    /// cannot parse.
    fn select_value(&self, value: SelectableValue) -> Result<(), ControlAdapterError>;

    /// Restores the value captured when the adapter was constructed.
    fn reset(&self);

    /// Returns the element the adapter is bound to.
    fn target(&self) -> &Element;

    /// Notifies change observers that the control's value changed.
    fn trigger_change(&self);

    /// Notifies submit observers that the user signalled submit intent.
    fn trigger_submit(&self);

    /// Registers a change observer under a receiver id. Re-registering the
    /// same id replaces the previous observer.
    fn on_change(&self, receiver: &str, listener: AdapterListener);

    /// Registers a submit observer under a receiver id.
    fn on_submit(&self, receiver: &str, listener: AdapterListener);

    /// Removes a change observer. Returns `true` if one was registered.
    fn remove_change_observer(&self, receiver: &str) -> bool;

    /// Removes a submit observer. Returns `true` if one was registered.
    fn remove_submit_observer(&self, receiver: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holder_accessors() {
        let context = Element::new("input");
        let holder = ControlValueHolder::new(Some("City".to_string()), "213", context.clone());
        assert_eq!(holder.label(), Some("City"));
        assert_eq!(holder.value(), "213");
        assert_eq!(holder.context(), &context);
    }

    #[test]
    fn test_holder_equality_ignores_nothing_but_identity_of_context() {
        let context = Element::new("input");
        let a = ControlValueHolder::new(None, "x", context.clone());
        let b = ControlValueHolder::new(None, "x", context);
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_not_supported_message() {
        assert_eq!(
            ControlAdapterError::SelectNotSupported.to_string(),
            "Select value is not supported on a container control adapter"
        );
    }
}
