//! Error types for the entity-query expression model.

use thiserror::Error;

/// Errors raised while constructing or assembling query expressions.
///
/// These are programmer errors: dynamic input (DOM attributes, adapter
/// values) may legitimately be absent, but a required field of a query
/// value type may never be.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityQueryError {
    /// A required field of a query value type was missing.
    #[error("{type_name}: {field} may not be null or undefined")]
    NullOrUndefined {
        /// The value type being constructed (e.g. `EQValue`).
        type_name: &'static str,
        /// The missing field (e.g. `value`).
        field: &'static str,
    },

    /// A token could not be resolved to an operator.
    #[error("unknown entity query operator token: '{0}'")]
    UnknownToken(String),

    /// An [`EntityQuery`](crate::EntityQuery) was given a non-logical operand.
    #[error("EntityQuery operand type must be either AND or OR, got '{0}'")]
    InvalidOperand(String),
}

impl EntityQueryError {
    pub(crate) const fn null_or_undefined(type_name: &'static str, field: &'static str) -> Self {
        Self::NullOrUndefined { type_name, field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_or_undefined_display_names_type_and_field() {
        let err = EntityQueryError::null_or_undefined("EQFunction", "name");
        assert_eq!(
            err.to_string(),
            "EQFunction: name may not be null or undefined"
        );
    }

    #[test]
    fn test_unknown_token_display() {
        let err = EntityQueryError::UnknownToken("between".to_string());
        assert_eq!(
            err.to_string(),
            "unknown entity query operator token: 'between'"
        );
    }
}
