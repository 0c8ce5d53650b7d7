//! Converting adapter values to typed query arguments.

use adminui_rs_controls::ControlValueHolder;
use adminui_rs_query::EQType;

use crate::control::PRETTY_VALUE_ATTRIBUTE;

/// The value type a filter control declares through
/// `data-entityquery-type`. Anything other than the two named types falls
/// back to auto-typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeclaredType {
    /// Auto-type the joined value: numeric text becomes a raw value,
    /// everything else a quoted string.
    #[default]
    Auto,
    /// Force a quoted string even when the value looks numeric.
    String,
    /// Wrap every individual value in a parenthesized group.
    Group,
}

impl DeclaredType {
    /// Parses the attribute value; unknown or absent values auto-type.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("EQString") => Self::String,
            Some("EQGroup") => Self::Group,
            _ => Self::Auto,
        }
    }
}

/// Converts adapter values to one query argument.
///
/// Each holder contributes its pretty-value override (declared on the
/// holder's context element) or its raw value; empty strings are dropped.
/// For [`DeclaredType::Group`] every remaining value is auto-typed and
/// wrapped in a group. Otherwise the remaining values are joined with a
/// single space and auto-typed, with [`DeclaredType::String`] re-wrapping a
/// numeric-looking result as a quoted string. Returns `None` when nothing
/// usable remains, which clears the condition.
#[must_use]
pub fn convert(declared: DeclaredType, holders: &[ControlValueHolder]) -> Option<EQType> {
    let values: Vec<String> = holders
        .iter()
        .map(pretty_or_raw)
        .filter(|value| !value.is_empty())
        .collect();
    if values.is_empty() {
        return None;
    }

    match declared {
        DeclaredType::Group => Some(EQType::group(
            values.iter().map(|value| auto_type(value)),
        )),
        DeclaredType::String => Some(EQType::string(values.join(" "))),
        DeclaredType::Auto => Some(auto_type(&values.join(" "))),
    }
}

fn pretty_or_raw(holder: &ControlValueHolder) -> String {
    holder
        .context()
        .attribute(PRETTY_VALUE_ATTRIBUTE)
        .unwrap_or_else(|| holder.value().to_string())
}

fn auto_type(value: &str) -> EQType {
    if let Ok(int) = value.parse::<i64>() {
        return EQType::value(int);
    }
    if let Ok(float) = value.parse::<f64>() {
        return EQType::value(float);
    }
    EQType::string(value)
}
