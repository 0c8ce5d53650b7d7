//! # adminui-rs-filter
//!
//! Binds control adapters to entity-query conditions. Every filter control
//! in a form declares a property, an operator token and an optional value
//! type through `data-entityquery-*` attributes; its adapter's values are
//! converted to a typed query argument and installed as a condition in the
//! form's [`EntityQueryFilterControl`]. The assembled query's textual
//! rendering is written into a hidden field the server re-parses on submit.

pub mod control;
pub mod converter;
pub mod error;

pub use control::{
    EntityQueryFilterControl, PropertyControl, FILTER_FIELD_CLASS, OPERAND_ATTRIBUTE,
    PRETTY_VALUE_ATTRIBUTE, PROPERTY_ATTRIBUTE, TYPE_ATTRIBUTE,
};
pub use converter::{convert, DeclaredType};
pub use error::FilterError;
