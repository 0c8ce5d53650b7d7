//! Page bootstrapping: scan a node tree and wire every component found.

use std::cell::RefCell;
use std::rc::Rc;

use adminui_rs_controls::{default_registry, ControlAdapterError, ControlAdapterRegistry};
use adminui_rs_dom::Element;
use adminui_rs_filter::{EntityQueryFilterControl, FilterError, FILTER_FIELD_CLASS};
use adminui_rs_table::{
    FragmentLoader, SortableTable, TableError, TABLE_TYPE_ATTRIBUTE,
};
use thiserror::Error;
use tracing::debug;

/// A callback run against every node handed to [`AdminUi::initialize_node`].
pub type Initializer = Rc<dyn Fn(&Element)>;

/// Errors raised while bootstrapping a node tree.
#[derive(Debug, Error)]
pub enum AdminUiError {
    /// Initializing control adapters failed.
    #[error(transparent)]
    Adapter(#[from] ControlAdapterError),

    /// Attaching a filter form failed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Attaching a table failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// The page-level entry point.
///
/// `AdminUi` owns the adapter registry and keeps every component it wires
/// alive: filter controls and tables hold weak references internally, so
/// dropping the `AdminUi` releases the whole page's behavior at once.
pub struct AdminUi {
    registry: Rc<ControlAdapterRegistry>,
    loader: RefCell<Option<Rc<dyn FragmentLoader>>>,
    initializers: RefCell<Vec<Initializer>>,
    initialized: RefCell<Vec<Element>>,
    tables: RefCell<Vec<SortableTable>>,
    filters: RefCell<Vec<EntityQueryFilterControl>>,
}

impl AdminUi {
    /// Creates a bootstrapper with the default adapter registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }

    /// Creates a bootstrapper with a custom adapter registry.
    #[must_use]
    pub fn with_registry(registry: ControlAdapterRegistry) -> Self {
        Self {
            registry: Rc::new(registry),
            loader: RefCell::new(None),
            initializers: RefCell::new(Vec::new()),
            initialized: RefCell::new(Vec::new()),
            tables: RefCell::new(Vec::new()),
            filters: RefCell::new(Vec::new()),
        }
    }

    /// Returns the adapter registry.
    #[must_use]
    pub fn registry(&self) -> &Rc<ControlAdapterRegistry> {
        &self.registry
    }

    /// Installs the fragment loader handed to every table, including the
    /// ones already wired.
    pub fn set_fragment_loader(&self, loader: Rc<dyn FragmentLoader>) {
        for table in self.tables.borrow().iter() {
            table.set_fragment_loader(Rc::clone(&loader));
        }
        *self.loader.borrow_mut() = Some(loader);
    }

    /// Registers a callback run against every node passed to
    /// [`Self::initialize_node`]. With `call_if_already_initialized` the
    /// callback is also run immediately against nodes initialized earlier.
    pub fn register_initializer(&self, callback: Initializer, call_if_already_initialized: bool) {
        if call_if_already_initialized {
            for node in self.initialized.borrow().iter() {
                callback(node);
            }
        }
        self.initializers.borrow_mut().push(callback);
    }

    /// Wires all components found under a node, then runs the registered
    /// initializers against it.
    ///
    /// Control adapters are initialized first so filter forms and tables
    /// find them in place. Forms carrying a filter field become
    /// [`EntityQueryFilterControl`]s; elements marked `data-tbl-type="paged"`
    /// become [`SortableTable`]s.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminUiError`] when any component fails to attach.
    pub fn initialize_node(&self, node: &Element) -> Result<(), AdminUiError> {
        self.registry.initialize_control_adapters(node)?;

        for form in candidates(node, |el| el.tag() == "form") {
            if form
                .find_first(|el| el.has_class(FILTER_FIELD_CLASS))
                .is_some()
            {
                let filter = EntityQueryFilterControl::attach(&self.registry, &form)?;
                self.filters.borrow_mut().push(filter);
                debug!("filter form wired");
            }
        }

        for element in candidates(node, |el| {
            el.attribute(TABLE_TYPE_ATTRIBUTE).as_deref() == Some("paged")
        }) {
            let table = SortableTable::attach(Rc::clone(&self.registry), &element)?;
            if let Some(loader) = self.loader.borrow().as_ref() {
                table.set_fragment_loader(Rc::clone(loader));
            }
            self.tables.borrow_mut().push(table);
            debug!("paged table wired");
        }

        let initializers: Vec<Initializer> = self.initializers.borrow().clone();
        for initializer in initializers {
            initializer(node);
        }
        self.initialized.borrow_mut().push(node.clone());
        Ok(())
    }

    /// Returns handles to all wired tables.
    #[must_use]
    pub fn tables(&self) -> Vec<SortableTable> {
        self.tables.borrow().clone()
    }

    /// Returns handles to all wired filter controls.
    #[must_use]
    pub fn filters(&self) -> Vec<EntityQueryFilterControl> {
        self.filters.borrow().clone()
    }
}

impl Default for AdminUi {
    fn default() -> Self {
        Self::new()
    }
}

/// The node itself plus its descendants, filtered.
fn candidates(node: &Element, predicate: impl Fn(&Element) -> bool) -> Vec<Element> {
    std::iter::once(node.clone())
        .chain(node.descendants())
        .filter(|el| predicate(el))
        .collect()
}
