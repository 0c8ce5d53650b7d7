//! Observer registration for adapter change and submit notifications.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::adapter::ControlAdapter;

/// An observer invoked with the adapter that raised the notification.
pub type AdapterListener = Rc<dyn Fn(&dyn ControlAdapter)>;

/// Change and submit observer lists, keyed by string receiver id.
///
/// Registering an observer under an id that is already in use replaces the
/// previous observer, so wiring code can re-run without stacking callbacks.
/// Emission snapshots the list first: observers may register or remove
/// observers from within a notification.
#[derive(Default)]
pub struct AdapterObservers {
    change: RefCell<Vec<(String, AdapterListener)>>,
    submit: RefCell<Vec<(String, AdapterListener)>>,
}

impl fmt::Debug for AdapterObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterObservers")
            .field("change", &self.change.borrow().len())
            .field("submit", &self.submit.borrow().len())
            .finish()
    }
}

impl AdapterObservers {
    /// Creates empty observer lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a change observer under a receiver id.
    pub fn connect_change(&self, receiver: &str, listener: AdapterListener) {
        connect(&self.change, receiver, listener);
    }

    /// Registers a submit observer under a receiver id.
    pub fn connect_submit(&self, receiver: &str, listener: AdapterListener) {
        connect(&self.submit, receiver, listener);
    }

    /// Removes a change observer. Returns `true` if one was registered.
    pub fn disconnect_change(&self, receiver: &str) -> bool {
        disconnect(&self.change, receiver)
    }

    /// Removes a submit observer. Returns `true` if one was registered.
    pub fn disconnect_submit(&self, receiver: &str) -> bool {
        disconnect(&self.submit, receiver)
    }

    /// Notifies all change observers.
    pub fn emit_change(&self, adapter: &dyn ControlAdapter) {
        emit(&self.change, adapter);
    }

    /// Notifies all submit observers.
    pub fn emit_submit(&self, adapter: &dyn ControlAdapter) {
        emit(&self.submit, adapter);
    }
}

fn connect(list: &RefCell<Vec<(String, AdapterListener)>>, receiver: &str, listener: AdapterListener) {
    let mut entries = list.borrow_mut();
    if let Some(entry) = entries.iter_mut().find(|(id, _)| id == receiver) {
        entry.1 = listener;
    } else {
        entries.push((receiver.to_string(), listener));
    }
}

fn disconnect(list: &RefCell<Vec<(String, AdapterListener)>>, receiver: &str) -> bool {
    let mut entries = list.borrow_mut();
    let len_before = entries.len();
    entries.retain(|(id, _)| id != receiver);
    entries.len() < len_before
}

fn emit(list: &RefCell<Vec<(String, AdapterListener)>>, adapter: &dyn ControlAdapter) {
    let snapshot: Vec<AdapterListener> =
        list.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
    for listener in snapshot {
        listener(adapter);
    }
}
