//! # adminui-rs
//!
//! Client-side UI glue for server-rendered admin interfaces.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access, plus the [`AdminUi`] bootstrapper that scans a node tree and
//! wires every component it finds. You can depend on `adminui-rs` for the
//! whole stack, or on individual crates for finer-grained control.

/// Element tree, events and node-local data.
pub use adminui_rs_dom as dom;

/// Entity-query model: operators, expressions, sorting and rendering.
pub use adminui_rs_query as query;

/// Control adapters normalizing form widgets behind one interface.
pub use adminui_rs_controls as controls;

/// Entity-query filter forms built on control adapters.
pub use adminui_rs_filter as filter;

/// Paged, sortable table component.
pub use adminui_rs_table as table;

mod admin_ui;

pub use admin_ui::{AdminUi, AdminUiError, Initializer};
