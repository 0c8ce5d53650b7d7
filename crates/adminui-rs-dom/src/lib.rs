//! # adminui-rs-dom
//!
//! A minimal, single-threaded element tree used as the substrate for
//! server-rendered markup fragments. Control adapters, filter controls and
//! sortable tables all operate against [`Element`] handles rather than a
//! browser DOM, which keeps the whole stack testable without a browser.
//!
//! The tree supports the small subset of DOM behavior the components need:
//! attributes and CSS-like classes, form-control state (value / checked /
//! selected), ordered children with document-order traversal, node-local
//! data for attaching component instances, and bubbling event dispatch with
//! `stop_propagation` / `prevent_default`.

pub mod element;
pub mod event;

pub use element::Element;
pub use event::Event;
