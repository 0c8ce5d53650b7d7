//! Adapter aggregating the adapters inside a subtree.

use std::rc::Rc;

use adminui_rs_dom::Element;

use crate::adapter::{ControlAdapter, ControlAdapterError, ControlValueHolder, SelectableValue};
use crate::adapters::impl_adapter_observers;
use crate::events::AdapterObservers;
use crate::registry::{ControlAdapterRegistry, ADAPTER_TYPE_ATTRIBUTE};

/// Aggregates the control adapters found inside its subtree.
///
/// Member adapters are discovered once, at construction, in document order.
/// Discovery stops at adapter boundaries: a nested adapter becomes a member
/// and its own subtree is not searched further, so a nested container owns
/// its own members. The member list is never rescanned.
pub struct ContainerControlAdapter {
    target: Element,
    members: Vec<Rc<dyn ControlAdapter>>,
    observers: AdapterObservers,
}

impl ContainerControlAdapter {
    /// Builds the container, constructing member adapters through the
    /// registry.
    ///
    /// # Errors
    ///
    /// Propagates the first member construction failure.
    pub fn attach(
        registry: &ControlAdapterRegistry,
        element: &Element,
    ) -> Result<Rc<Self>, ControlAdapterError> {
        let mut members = Vec::new();
        collect_members(registry, element, &mut members)?;
        Ok(Rc::new(Self {
            target: element.clone(),
            members,
            observers: AdapterObservers::new(),
        }))
    }

    /// Returns the member adapters, in document order.
    pub fn members(&self) -> &[Rc<dyn ControlAdapter>] {
        &self.members
    }
}

fn collect_members(
    registry: &ControlAdapterRegistry,
    element: &Element,
    members: &mut Vec<Rc<dyn ControlAdapter>>,
) -> Result<(), ControlAdapterError> {
    for child in element.children() {
        if let Some(adapter_type) = child.attribute(ADAPTER_TYPE_ATTRIBUTE) {
            if let Some(adapter) =
                registry.initialize_control_adapter(&adapter_type, &child, false)?
            {
                members.push(adapter);
                // Adapter boundary: the member owns its own subtree.
                continue;
            }
        }
        collect_members(registry, &child, members)?;
    }
    Ok(())
}

impl ControlAdapter for ContainerControlAdapter {
    fn get_value(&self) -> Vec<ControlValueHolder> {
        self.members
            .iter()
            .flat_map(|member| member.get_value())
            .collect()
    }

    fn select_value(&self, _value: SelectableValue) -> Result<(), ControlAdapterError> {
        Err(ControlAdapterError::SelectNotSupported)
    }

    fn reset(&self) {
        for member in &self.members {
            member.reset();
        }
    }

    fn target(&self) -> &Element {
        &self.target
    }

    impl_adapter_observers!();
}
