//! # adminui-rs-controls
//!
//! Control adapters: one uniform interface over server-rendered form
//! widgets. Every adapter wraps a DOM subtree carrying a
//! `data-bootstrapui-adapter-type` attribute and exposes the same contract:
//! read the current value(s) as [`ControlValueHolder`]s, write a
//! [`SelectableValue`], reset to the initial value, and notify registered
//! observers on change and submit intent.
//!
//! Adapters are built through a [`ControlAdapterRegistry`] and attached to
//! their element under the `bootstrapui-adapter` node-data key, so a subtree
//! can be scanned repeatedly without double-initialization.

pub mod adapter;
pub mod adapters;
pub mod events;
pub mod registry;

pub use adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
pub use events::AdapterObservers;
pub use registry::{adapter_for, default_registry, ControlAdapterRegistry, ADAPTER_TYPE_ATTRIBUTE};
