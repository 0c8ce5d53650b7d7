//! Error types for filter binding.

use adminui_rs_controls::ControlAdapterError;
use adminui_rs_query::EntityQueryError;
use thiserror::Error;

/// Errors raised while wiring a filter form.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter form has no hidden query field to write into.
    #[error("filter form has no hidden query field (class '{0}')")]
    MissingFilterField(&'static str),

    /// A filter control is missing a required `data-entityquery-*` attribute.
    #[error("filter control is missing the '{0}' attribute")]
    MissingAttribute(&'static str),

    /// The declared operand token or value type could not be resolved.
    #[error(transparent)]
    Query(#[from] EntityQueryError),

    /// An adapter could not be constructed for a filter control.
    #[error(transparent)]
    Adapter(#[from] ControlAdapterError),
}
