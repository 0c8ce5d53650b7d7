//! Typed literal values for entity-query expressions.
//!
//! The value model is a small closed hierarchy: a raw scalar ([`EQValue`]),
//! a quoted string ([`EQString`]), an ordered group ([`EQGroup`]) and a
//! named function call ([`EQFunction`]), unified behind the [`EQType`]
//! tagged variant. All of them are immutable value objects whose `Display`
//! output is the EQL literal syntax.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EntityQueryError;

/// A raw scalar carried by an [`EQValue`].
///
/// Scalars render without quoting: `10`, `1.5`, `true`, `My string`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Scalar {
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// Raw, unquoted text.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A typed entity-query literal: the argument side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EQType {
    /// An unquoted scalar.
    Value(EQValue),
    /// A quoted string.
    String(EQString),
    /// An ordered, parenthesized group of literals.
    Group(EQGroup),
    /// A named function call.
    Function(EQFunction),
}

impl EQType {
    /// Wraps a scalar into an unquoted value literal.
    pub fn value(value: impl Into<Scalar>) -> Self {
        Self::Value(EQValue::new(value))
    }

    /// Wraps a string into a quoted string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(EQString::new(value))
    }

    /// Wraps literals into a group.
    pub fn group(values: impl IntoIterator<Item = Self>) -> Self {
        Self::Group(EQGroup::new(values))
    }

    /// Wraps a name and arguments into a function literal.
    pub fn function(name: impl Into<String>, arguments: impl IntoIterator<Item = Self>) -> Self {
        Self::Function(EQFunction::new(name, arguments))
    }
}

impl fmt::Display for EQType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => v.fmt(f),
            Self::String(s) => s.fmt(f),
            Self::Group(g) => g.fmt(f),
            Self::Function(func) => func.fmt(f),
        }
    }
}

/// An unquoted scalar literal. Renders its raw value: `10`, `My string`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EQValue {
    value: Scalar,
}

impl EQValue {
    /// Creates a value literal from a scalar.
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Creates a value literal from dynamic input that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`EntityQueryError::NullOrUndefined`] naming `EQValue`/`value`
    /// when `value` is `None`.
    pub fn from_optional(value: Option<Scalar>) -> Result<Self, EntityQueryError> {
        value
            .map(|value| Self { value })
            .ok_or(EntityQueryError::null_or_undefined("EQValue", "value"))
    }

    /// Returns the wrapped scalar.
    pub fn value(&self) -> &Scalar {
        &self.value
    }
}

impl fmt::Display for EQValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// A quoted string literal.
///
/// Renders wrapped in single quotes; internal single quotes are escaped as
/// `\'` while other quote characters pass through untouched:
/// `some ' "value` renders as `'some \' "value'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EQString {
    value: String,
}

impl EQString {
    /// Creates a string literal.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Creates a string literal from dynamic input that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`EntityQueryError::NullOrUndefined`] naming `EQString`/`value`
    /// when `value` is `None`.
    pub fn from_optional(value: Option<String>) -> Result<Self, EntityQueryError> {
        value
            .map(|value| Self { value })
            .ok_or(EntityQueryError::null_or_undefined("EQString", "value"))
    }

    /// Returns the unescaped string value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EQString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value.replace('\'', "\\'"))
    }
}

/// An ordered group of literals. Renders comma-joined in parentheses;
/// an empty group renders `()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EQGroup {
    values: Vec<EQType>,
}

impl EQGroup {
    /// Creates a group from the given literals, in order.
    ///
    /// The group owns its own copy of the values: later changes to the
    /// source collection have no effect on the group.
    pub fn new(values: impl IntoIterator<Item = EQType>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Returns the grouped literals, in order.
    pub fn values(&self) -> &[EQType] {
        &self.values
    }
}

impl fmt::Display for EQGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        write!(f, "({})", joined.join(","))
    }
}

/// A named function call literal. Renders `name(arg1,arg2)`; a call without
/// arguments renders `name()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EQFunction {
    name: String,
    arguments: Vec<EQType>,
}

impl EQFunction {
    /// Creates a function literal with the given name and arguments.
    pub fn new(name: impl Into<String>, arguments: impl IntoIterator<Item = EQType>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Creates a function literal from dynamic input where the name may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`EntityQueryError::NullOrUndefined`] naming `EQFunction`/`name`
    /// when `name` is `None`.
    pub fn from_optional(
        name: Option<String>,
        arguments: impl IntoIterator<Item = EQType>,
    ) -> Result<Self, EntityQueryError> {
        name.map(|name| Self {
            name,
            arguments: arguments.into_iter().collect(),
        })
        .ok_or(EntityQueryError::null_or_undefined("EQFunction", "name"))
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arguments, in order.
    pub fn arguments(&self) -> &[EQType] {
        &self.arguments
    }
}

impl fmt::Display for EQFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.name, joined.join(","))
    }
}
