//! Built-in control adapters.

pub mod autosuggest;
pub mod basic;
pub mod bootstrap_select;
pub mod checkbox;
pub mod container;
pub mod date_picker;
pub mod numeric;
pub mod select;

/// Listener id the adapters use for their own DOM subscriptions, so a
/// forced re-initialization replaces the old adapter's listeners instead of
/// stacking new ones on top.
pub(crate) const DOM_LISTENER_ID: &str = "adminui.adapter";

/// Implements the observer half of `ControlAdapter` by delegating to an
/// `observers: AdapterObservers` field.
macro_rules! impl_adapter_observers {
    () => {
        fn trigger_change(&self) {
            self.observers.emit_change(self);
        }

        fn trigger_submit(&self) {
            self.observers.emit_submit(self);
        }

        fn on_change(&self, receiver: &str, listener: $crate::events::AdapterListener) {
            self.observers.connect_change(receiver, listener);
        }

        fn on_submit(&self, receiver: &str, listener: $crate::events::AdapterListener) {
            self.observers.connect_submit(receiver, listener);
        }

        fn remove_change_observer(&self, receiver: &str) -> bool {
            self.observers.disconnect_change(receiver)
        }

        fn remove_submit_observer(&self, receiver: &str) -> bool {
            self.observers.disconnect_submit(receiver)
        }
    };
}

pub(crate) use impl_adapter_observers;
