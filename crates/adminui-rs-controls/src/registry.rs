//! Adapter construction and subtree scanning.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use adminui_rs_dom::Element;
use tracing::{debug, trace};

use crate::adapter::{ControlAdapter, ControlAdapterError};
use crate::adapters::autosuggest::AutosuggestControlAdapter;
use crate::adapters::basic::BasicControlAdapter;
use crate::adapters::bootstrap_select::BootstrapSelectControlAdapter;
use crate::adapters::checkbox::CheckboxControlAdapter;
use crate::adapters::container::ContainerControlAdapter;
use crate::adapters::date_picker::DatePickerControlAdapter;
use crate::adapters::numeric::NumericControlAdapter;
use crate::adapters::select::SelectControlAdapter;

/// The attribute a server-rendered fragment carries on every element that
/// should receive an adapter.
pub const ADAPTER_TYPE_ATTRIBUTE: &str = "data-bootstrapui-adapter-type";

/// Node-data key under which the constructed adapter is attached.
pub(crate) const ADAPTER_DATA_KEY: &str = "bootstrapui-adapter";

struct AdapterRef(Rc<dyn ControlAdapter>);

/// Returns the adapter attached to an element, if one was initialized.
pub fn adapter_for(element: &Element) -> Option<Rc<dyn ControlAdapter>> {
    element
        .data(ADAPTER_DATA_KEY)?
        .downcast::<AdapterRef>()
        .ok()
        .map(|stored| Rc::clone(&stored.0))
}

/// Builds an adapter for one element.
pub type AdapterConstructor =
    Rc<dyn Fn(&ControlAdapterRegistry, &Element) -> Result<Rc<dyn ControlAdapter>, ControlAdapterError>>;

/// Maps adapter type names to constructors and drives initialization scans.
///
/// The registry is an explicit object: callers own one (usually through the
/// facade crate) instead of mutating global state, so tests and embedded
/// uses can register their own types without leaking into each other.
#[derive(Default)]
pub struct ControlAdapterRegistry {
    constructors: RefCell<HashMap<String, AdapterConstructor>>,
}

impl ControlAdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor for an adapter type, overwriting any
    /// previous registration for the same type.
    pub fn register(&self, adapter_type: impl Into<String>, constructor: AdapterConstructor) {
        self.constructors
            .borrow_mut()
            .insert(adapter_type.into(), constructor);
    }

    /// Returns `true` if a constructor is registered for the type.
    pub fn is_registered(&self, adapter_type: &str) -> bool {
        self.constructors.borrow().contains_key(adapter_type)
    }

    /// Scans the descendants of `node` and initializes an adapter for every
    /// element carrying [`ADAPTER_TYPE_ATTRIBUTE`]. Already-initialized
    /// elements are left untouched, so re-scanning after a fragment splice
    /// is safe.
    ///
    /// # Errors
    ///
    /// Propagates the first construction failure.
    pub fn initialize_control_adapters(&self, node: &Element) -> Result<(), ControlAdapterError> {
        for element in node.descendants() {
            if let Some(adapter_type) = element.attribute(ADAPTER_TYPE_ATTRIBUTE) {
                self.initialize_control_adapter(&adapter_type, &element, false)?;
            }
        }
        Ok(())
    }

    /// Initializes a single adapter on an element.
    ///
    /// When the element already carries an adapter and `force` is `false`
    /// the existing adapter is returned unchanged. With `force` the old
    /// adapter is replaced. Unknown types are skipped with a debug log and
    /// yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates the adapter constructor's failure.
    pub fn initialize_control_adapter(
        &self,
        adapter_type: &str,
        element: &Element,
        force: bool,
    ) -> Result<Option<Rc<dyn ControlAdapter>>, ControlAdapterError> {
        if !force {
            if let Some(existing) = adapter_for(element) {
                trace!(adapter_type, "control adapter already initialized, skipping");
                return Ok(Some(existing));
            }
        }

        let constructor = self.constructors.borrow().get(adapter_type).cloned();
        let Some(constructor) = constructor else {
            debug!(adapter_type, "no control adapter registered for type, skipping");
            return Ok(None);
        };

        let adapter = constructor(self, element)?;
        element.set_data(ADAPTER_DATA_KEY, Rc::new(AdapterRef(Rc::clone(&adapter))));
        Ok(Some(adapter))
    }
}

/// Creates a registry with all built-in adapter types registered.
#[must_use]
pub fn default_registry() -> ControlAdapterRegistry {
    let registry = ControlAdapterRegistry::new();
    registry.register(
        "basic",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = BasicControlAdapter::attach(element);
            Ok(adapter)
        }),
    );
    registry.register(
        "checkbox",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = CheckboxControlAdapter::attach(element);
            Ok(adapter)
        }),
    );
    registry.register(
        "select",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = SelectControlAdapter::attach(element);
            Ok(adapter)
        }),
    );
    registry.register(
        "bootstrap-select",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = BootstrapSelectControlAdapter::attach(element)?;
            Ok(adapter)
        }),
    );
    registry.register(
        "numeric",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = NumericControlAdapter::attach(element)?;
            Ok(adapter)
        }),
    );
    registry.register(
        "datetime",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = DatePickerControlAdapter::attach(element)?;
            Ok(adapter)
        }),
    );
    registry.register(
        "autosuggest",
        Rc::new(|_, element| {
            let adapter: Rc<dyn ControlAdapter> = AutosuggestControlAdapter::attach(element)?;
            Ok(adapter)
        }),
    );
    registry.register(
        "container",
        Rc::new(|registry, element| {
            let adapter: Rc<dyn ControlAdapter> =
                ContainerControlAdapter::attach(registry, element)?;
            Ok(adapter)
        }),
    );
    registry
}
