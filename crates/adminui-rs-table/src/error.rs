//! Error types for the table component.

use adminui_rs_query::EntityQueryError;
use thiserror::Error;

use crate::loader::LoadError;

/// Errors raised while reading table state or loading paged data.
#[derive(Debug, Error)]
pub enum TableError {
    /// A required `data-tbl-*` attribute is absent.
    #[error("table is missing the '{0}' attribute")]
    MissingAttribute(&'static str),

    /// A `data-tbl-*` attribute holds a value that cannot be parsed.
    #[error("table attribute '{attribute}' holds an invalid value '{value}'")]
    MalformedAttribute {
        /// The offending attribute name.
        attribute: &'static str,
        /// The value found on the element.
        value: String,
    },

    /// The `data-tbl-sort` attribute holds malformed JSON.
    #[error("invalid sort attribute: {0}")]
    InvalidSort(#[from] serde_json::Error),

    /// A sort direction token could not be resolved.
    #[error(transparent)]
    Query(#[from] EntityQueryError),

    /// Re-initializing adapters over a freshly loaded fragment failed.
    #[error(transparent)]
    Adapter(#[from] adminui_rs_controls::ControlAdapterError),

    /// The table is configured for ajax loading but no fragment loader is
    /// installed.
    #[error("table loads data with ajax but no fragment loader is installed")]
    NoLoader,

    /// Loading a fragment kept failing after the retry budget ran out.
    #[error("loading paged data failed after {attempts} attempts")]
    LoadFailed {
        /// Number of attempts made.
        attempts: u32,
        /// The last transport failure.
        #[source]
        source: LoadError,
    },
}
