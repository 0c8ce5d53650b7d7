//! # adminui-rs-table
//!
//! Paged, sortable table component. A server-rendered table carries its
//! paging state in `data-tbl-*` attributes; [`SortableTable`] reads that
//! state, reacts to pager clicks, sort-header clicks and the page-selector
//! input, and reloads data either by submitting the owning form, by
//! producing a navigation URL, or by fetching a fragment through a
//! [`FragmentLoader`] and splicing it in place.

pub mod error;
pub mod loader;
pub mod params;
pub mod table;

pub use error::TableError;
pub use loader::{FragmentLoader, LoadError};
pub use params::{pending_params, PageParams, PARTIAL_FRAGMENT, PARTIAL_PARAMETER};
pub use table::{
    SortableTable, LOAD_DATA_EVENT, NEW_DATA_LOADED_EVENT, PREPARE_DATA_EVENT,
    TABLE_TYPE_ATTRIBUTE,
};
