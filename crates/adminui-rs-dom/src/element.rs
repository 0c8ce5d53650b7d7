//! The element tree: nodes, attributes, form-control state and traversal.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::Event;

type Listener = Rc<dyn Fn(&Event)>;

struct ElementData {
    tag: String,
    attributes: RefCell<BTreeMap<String, String>>,
    text: RefCell<String>,
    value: RefCell<String>,
    checked: Cell<bool>,
    selected: Cell<bool>,
    children: RefCell<Vec<Element>>,
    parent: RefCell<Weak<ElementData>>,
    data: RefCell<HashMap<String, Rc<dyn Any>>>,
    listeners: RefCell<HashMap<String, Vec<(String, Listener)>>>,
}

/// A handle to a node in the element tree.
///
/// `Element` is a cheap clone (reference-counted); all clones refer to the
/// same underlying node. Equality is identity: two handles are equal when
/// they point at the same node.
///
/// # Examples
///
/// ```
/// use adminui_rs_dom::Element;
///
/// let form = Element::new("form");
/// let input = Element::new("input").with_attribute("type", "text");
/// form.append_child(input.clone());
///
/// assert_eq!(form.children().len(), 1);
/// assert_eq!(input.parent(), Some(form));
/// ```
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementData>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.inner.tag)
            .field("attributes", &*self.inner.attributes.borrow())
            .finish_non_exhaustive()
    }
}

impl Element {
    /// Creates a new, detached element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ElementData {
                tag: tag.into(),
                attributes: RefCell::new(BTreeMap::new()),
                text: RefCell::new(String::new()),
                value: RefCell::new(String::new()),
                checked: Cell::new(false),
                selected: Cell::new(false),
                children: RefCell::new(Vec::new()),
                parent: RefCell::new(Weak::new()),
                data: RefCell::new(HashMap::new()),
                listeners: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Returns the tag name.
    pub fn tag(&self) -> String {
        self.inner.tag.clone()
    }

    // ── Attributes and classes ──────────────────────────────────────

    /// Returns the value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).cloned()
    }

    /// Sets an attribute, overwriting any existing value.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner
            .attributes
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    /// Removes an attribute. Returns the previous value, if any.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow_mut().remove(name)
    }

    /// Builder-style attribute setter, for constructing fixtures.
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns `true` if the space-separated `class` attribute contains `name`.
    pub fn has_class(&self, name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name))
    }

    /// Adds a class to the `class` attribute if not already present.
    pub fn add_class(&self, name: &str) {
        if !self.has_class(name) {
            let classes = self.attribute("class").unwrap_or_default();
            let updated = if classes.is_empty() {
                name.to_string()
            } else {
                format!("{classes} {name}")
            };
            self.set_attribute("class", updated);
        }
    }

    /// Removes a class from the `class` attribute.
    pub fn remove_class(&self, name: &str) {
        if let Some(classes) = self.attribute("class") {
            let remaining: Vec<&str> = classes
                .split_whitespace()
                .filter(|c| *c != name)
                .collect();
            self.set_attribute("class", remaining.join(" "));
        }
    }

    // ── Form-control state ──────────────────────────────────────────

    /// Returns the current control value (for inputs, selects, ...).
    pub fn value(&self) -> String {
        self.inner.value.borrow().clone()
    }

    /// Sets the current control value.
    pub fn set_value(&self, value: impl Into<String>) {
        *self.inner.value.borrow_mut() = value.into();
    }

    /// Returns `true` if the control is checked (checkboxes, radios).
    pub fn is_checked(&self) -> bool {
        self.inner.checked.get()
    }

    /// Sets the checked state.
    pub fn set_checked(&self, checked: bool) {
        self.inner.checked.set(checked);
    }

    /// Returns `true` if the element is selected (options).
    pub fn is_selected(&self) -> bool {
        self.inner.selected.get()
    }

    /// Sets the selected state.
    pub fn set_selected(&self, selected: bool) {
        self.inner.selected.set(selected);
    }

    /// Returns the element's text content.
    pub fn text(&self) -> String {
        self.inner.text.borrow().clone()
    }

    /// Sets the element's text content.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.inner.text.borrow_mut() = text.into();
    }

    /// Builder-style text setter.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    // ── Tree structure ──────────────────────────────────────────────

    /// Appends a child element, re-parenting it under this element.
    pub fn append_child(&self, child: Element) {
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child);
    }

    /// Builder-style child appender.
    #[must_use]
    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    /// Replaces all children with the given elements, re-parenting them.
    ///
    /// Used to splice a freshly loaded fragment into an existing subtree.
    pub fn replace_children(&self, children: Vec<Element>) {
        for child in &children {
            *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        }
        *self.inner.children.borrow_mut() = children;
    }

    /// Detaches a direct child. Returns `true` if the child was found.
    pub fn remove_child(&self, child: &Element) -> bool {
        let mut children = self.inner.children.borrow_mut();
        let len_before = children.len();
        children.retain(|c| c != child);
        let removed = children.len() < len_before;
        if removed {
            *child.inner.parent.borrow_mut() = Weak::new();
        }
        removed
    }

    /// Returns the direct children, in document order.
    pub fn children(&self) -> Vec<Element> {
        self.inner.children.borrow().clone()
    }

    /// Returns the parent element, if attached.
    pub fn parent(&self) -> Option<Element> {
        self.inner.parent.borrow().upgrade().map(|inner| Element { inner })
    }

    /// Returns all descendants in document order, excluding this element.
    pub fn descendants(&self) -> Vec<Element> {
        let mut result = Vec::new();
        collect_descendants(self, &mut result);
        result
    }

    /// Returns all descendants matching the predicate, in document order.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<Element> {
        self.descendants()
            .into_iter()
            .filter(|el| predicate(el))
            .collect()
    }

    /// Returns the first descendant matching the predicate, in document order.
    pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<Element> {
        self.descendants().into_iter().find(|el| predicate(el))
    }

    /// Returns the closest element (this element or an ancestor) matching
    /// the predicate.
    pub fn closest(&self, predicate: impl Fn(&Element) -> bool) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if predicate(&el) {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }

    // ── Node-local data ─────────────────────────────────────────────

    /// Stores node-local data under a key, overwriting any previous entry.
    pub fn set_data(&self, key: impl Into<String>, value: Rc<dyn Any>) {
        self.inner.data.borrow_mut().insert(key.into(), value);
    }

    /// Returns the node-local data stored under a key.
    pub fn data(&self, key: &str) -> Option<Rc<dyn Any>> {
        self.inner.data.borrow().get(key).cloned()
    }

    /// Removes node-local data. Returns `true` if an entry was removed.
    pub fn remove_data(&self, key: &str) -> bool {
        self.inner.data.borrow_mut().remove(key).is_some()
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Registers a listener for an event type.
    ///
    /// The `listener_id` identifies the listener for later removal; a
    /// listener registered with an already-used id replaces the previous one.
    pub fn add_event_listener(
        &self,
        event_type: impl Into<String>,
        listener_id: impl Into<String>,
        listener: Rc<dyn Fn(&Event)>,
    ) {
        let id = listener_id.into();
        let mut listeners = self.inner.listeners.borrow_mut();
        let entries = listeners.entry(event_type.into()).or_default();
        if let Some(entry) = entries.iter_mut().find(|(lid, _)| *lid == id) {
            entry.1 = listener;
        } else {
            entries.push((id, listener));
        }
    }

    /// Removes a listener by id. Returns `true` if a listener was removed.
    pub fn remove_event_listener(&self, event_type: &str, listener_id: &str) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        if let Some(entries) = listeners.get_mut(event_type) {
            let len_before = entries.len();
            entries.retain(|(id, _)| id != listener_id);
            return entries.len() < len_before;
        }
        false
    }

    /// Dispatches an event on this element, bubbling up through ancestors
    /// until the root is reached or propagation is stopped.
    pub fn dispatch(&self, event: &Event) {
        tracing::trace!(event_type = event.event_type(), tag = %self.inner.tag, "dispatching event");
        event.set_target(self.clone());
        let mut current = Some(self.clone());
        while let Some(el) = current {
            // Snapshot so listeners may (de)register without re-entrancy issues.
            let entries: Vec<(String, Listener)> = el
                .inner
                .listeners
                .borrow()
                .get(event.event_type())
                .cloned()
                .unwrap_or_default();
            for (_, listener) in entries {
                listener(event);
            }
            if event.propagation_stopped() {
                break;
            }
            current = el.parent();
        }
    }
}

fn collect_descendants(element: &Element, result: &mut Vec<Element>) {
    for child in element.children() {
        result.push(child.clone());
        collect_descendants(&child, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_attributes() {
        let el = Element::new("input");
        assert!(el.attribute("name").is_none());
        el.set_attribute("name", "city");
        assert_eq!(el.attribute("name"), Some("city".to_string()));
        assert_eq!(el.remove_attribute("name"), Some("city".to_string()));
        assert!(el.attribute("name").is_none());
    }

    #[test]
    fn test_classes() {
        let el = Element::new("th");
        el.add_class("asc");
        el.add_class("sortable");
        assert!(el.has_class("asc"));
        assert!(el.has_class("sortable"));
        el.add_class("asc");
        assert_eq!(el.attribute("class"), Some("asc sortable".to_string()));
        el.remove_class("asc");
        assert!(!el.has_class("asc"));
        assert!(el.has_class("sortable"));
    }

    #[test]
    fn test_tree_structure() {
        let root = Element::new("div");
        let child = Element::new("span");
        let grandchild = Element::new("input");
        child.append_child(grandchild.clone());
        root.append_child(child.clone());

        assert_eq!(grandchild.parent(), Some(child.clone()));
        assert_eq!(root.descendants(), vec![child.clone(), grandchild.clone()]);
        assert!(root.remove_child(&child));
        assert!(grandchild.parent().is_some());
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_descendants_document_order() {
        let root = Element::new("div");
        let first = Element::new("a").with_child(Element::new("b"));
        let second = Element::new("c");
        root.append_child(first.clone());
        root.append_child(second.clone());

        let tags: Vec<String> = root.descendants().iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_and_closest() {
        let root = Element::new("form").with_attribute("name", "filter");
        let wrapper = Element::new("div");
        let input = Element::new("input").with_attribute("type", "checkbox");
        wrapper.append_child(input.clone());
        root.append_child(wrapper);

        let found = root.find_first(|el| el.attribute("type").as_deref() == Some("checkbox"));
        assert_eq!(found, Some(input.clone()));
        let form = input.closest(|el| el.tag() == "form");
        assert_eq!(form, Some(root));
    }

    #[test]
    fn test_node_local_data() {
        let el = Element::new("select");
        el.set_data("marker", Rc::new(42_i32));
        let stored = el.data("marker").unwrap();
        assert_eq!(*stored.downcast::<i32>().unwrap(), 42);
        assert!(el.remove_data("marker"));
        assert!(el.data("marker").is_none());
    }

    #[test]
    fn test_event_bubbling() {
        let root = Element::new("div");
        let child = Element::new("input");
        root.append_child(child.clone());

        let root_hits = Rc::new(Cell::new(0));
        let hits = Rc::clone(&root_hits);
        root.add_event_listener(
            "change",
            "counter",
            Rc::new(move |_| hits.set(hits.get() + 1)),
        );

        child.dispatch(&Event::new("change"));
        assert_eq!(root_hits.get(), 1);
    }

    #[test]
    fn test_stop_propagation() {
        let root = Element::new("div");
        let child = Element::new("input");
        root.append_child(child.clone());

        child.add_event_listener(
            "change",
            "stopper",
            Rc::new(|event: &Event| event.stop_propagation()),
        );
        let root_hits = Rc::new(Cell::new(0));
        let hits = Rc::clone(&root_hits);
        root.add_event_listener(
            "change",
            "counter",
            Rc::new(move |_| hits.set(hits.get() + 1)),
        );

        child.dispatch(&Event::new("change"));
        assert_eq!(root_hits.get(), 0);
    }

    #[test]
    fn test_listener_replaced_by_id() {
        let el = Element::new("input");
        let first_hits = Rc::new(Cell::new(0));
        let second_hits = Rc::new(Cell::new(0));

        let hits = Rc::clone(&first_hits);
        el.add_event_listener("change", "handler", Rc::new(move |_| hits.set(hits.get() + 1)));
        let hits = Rc::clone(&second_hits);
        el.add_event_listener("change", "handler", Rc::new(move |_| hits.set(hits.get() + 1)));

        el.dispatch(&Event::new("change"));
        assert_eq!(first_hits.get(), 0);
        assert_eq!(second_hits.get(), 1);
    }

    #[test]
    fn test_replace_children_reparents() {
        let root = Element::new("table");
        root.append_child(Element::new("tr"));
        let fresh = Element::new("tr").with_attribute("data-row", "new");
        root.replace_children(vec![fresh.clone()]);
        assert_eq!(root.children(), vec![fresh.clone()]);
        assert_eq!(fresh.parent(), Some(root));
    }

    #[test]
    fn test_event_target_is_dispatch_origin() {
        let root = Element::new("div");
        let child = Element::new("input");
        root.append_child(child.clone());

        let seen = Rc::new(RefCell::new(None));
        let seen_clone = Rc::clone(&seen);
        root.add_event_listener(
            "change",
            "capture-target",
            Rc::new(move |event: &Event| {
                *seen_clone.borrow_mut() = event.target();
            }),
        );

        child.dispatch(&Event::new("change"));
        assert_eq!(*seen.borrow(), Some(child));
    }
}
