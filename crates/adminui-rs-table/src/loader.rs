//! Fragment loading seam for ajax-style data reloads.

use adminui_rs_dom::Element;
use thiserror::Error;

/// A transport failure while fetching a fragment.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct LoadError(String);

impl LoadError {
    /// Creates a transport failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Fetches a server-rendered fragment for a parameter set.
///
/// The host environment supplies the implementation (an HTTP client, a test
/// stub). The returned element is the root of the fragment; its children
/// are spliced in place of the table's current content.
pub trait FragmentLoader {
    /// Fetches the fragment at `url` with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] on transport failure; the table retries a
    /// bounded number of times before giving up.
    fn load(&self, url: &str, params: &[(String, String)]) -> Result<Element, LoadError>;
}
