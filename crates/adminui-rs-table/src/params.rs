//! The parameter set describing one page load.

use std::cell::RefCell;
use std::rc::Rc;

use adminui_rs_dom::Element;
use url::form_urlencoded;

/// Marker parameter requesting a partial render from the server.
pub const PARTIAL_PARAMETER: &str = "_partial";
/// Fragment name the partial render resolves to.
pub const PARTIAL_FRAGMENT: &str = "::itemsTable";

pub(crate) const PARAMS_DATA_KEY: &str = "tbl-params";

/// The request parameters for one page of table data: the 0-based page
/// number, the page size, the sort entries in `property,DIRECTION` form and
/// any extra parameters added during the prepare stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// 0-based page number.
    pub page: usize,
    /// Page size.
    pub size: usize,
    /// Sort entries, most significant first, as `property,DIRECTION`.
    pub sort: Vec<String>,
    /// Extra parameters (e.g. the partial-render marker).
    pub extra: Vec<(String, String)>,
}

impl PageParams {
    /// Returns all parameters as flat name/value pairs, sort entries
    /// repeated under the `sort` name.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        for order in &self.sort {
            entries.push(("sort".to_string(), order.clone()));
        }
        entries.extend(self.extra.iter().cloned());
        entries
    }

    /// Returns the parameters grouped by name, preserving entry order.
    #[must_use]
    pub fn grouped_entries(&self) -> Vec<(String, Vec<String>)> {
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (name, value) in self.entries() {
            if let Some(group) = grouped.iter_mut().find(|(n, _)| *n == name) {
                group.1.push(value);
            } else {
                grouped.push((name, vec![value]));
            }
        }
        grouped
    }

    /// Renders the parameters as a URL query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.entries() {
            serializer.append_pair(&name, &value);
        }
        serializer.finish()
    }
}

/// Returns the parameter set a table is currently dispatching its prepare
/// or load event for. Listeners may mutate it to override the request.
#[must_use]
pub fn pending_params(element: &Element) -> Option<Rc<RefCell<PageParams>>> {
    element
        .data(PARAMS_DATA_KEY)?
        .downcast::<RefCell<PageParams>>()
        .ok()
}
