//! Event objects dispatched through the element tree.

use std::cell::{Cell, RefCell};

use crate::element::Element;

/// An event travelling through the element tree.
///
/// Events bubble from the dispatch target up through its ancestors until the
/// root is reached or a listener calls [`Event::stop_propagation`]. Listeners
/// that want to replace a default behavior call [`Event::prevent_default`];
/// the code dispatching the event decides what "default" means.
pub struct Event {
    event_type: String,
    key: Option<String>,
    target: RefCell<Option<Element>>,
    propagation_stopped: Cell<bool>,
    default_prevented: Cell<bool>,
}

impl Event {
    /// Creates a new event of the given type (e.g. `"change"`, `"keydown"`).
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            key: None,
            target: RefCell::new(None),
            propagation_stopped: Cell::new(false),
            default_prevented: Cell::new(false),
        }
    }

    /// Attaches a key name to the event, for keyboard events.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Returns the event type.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns the key name for keyboard events, if any.
    pub fn key(&self) -> Option<String> {
        self.key.clone()
    }

    /// Returns the element the event was originally dispatched on.
    ///
    /// `None` until the event has been dispatched.
    pub fn target(&self) -> Option<Element> {
        self.target.borrow().clone()
    }

    pub(crate) fn set_target(&self, target: Element) {
        *self.target.borrow_mut() = Some(target);
    }

    /// Stops the event from bubbling to ancestor elements.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Returns `true` if a listener stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// Marks the default behavior as cancelled.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Returns `true` if a listener prevented the default behavior.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
