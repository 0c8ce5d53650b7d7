//! Property controls and the filter form control.

use std::cell::RefCell;
use std::rc::Rc;

use adminui_rs_controls::{adapter_for, ControlAdapter, ControlAdapterRegistry};
use adminui_rs_dom::Element;
use adminui_rs_query::{EntityQuery, EntityQueryCondition, EntityQueryOps};
use tracing::debug;

use crate::converter::{convert, DeclaredType};
use crate::error::FilterError;

/// Property name the control filters on.
pub const PROPERTY_ATTRIBUTE: &str = "data-entityquery-property";
/// Operator token (e.g. `=`, `like`, `in`) the control's condition uses.
pub const OPERAND_ATTRIBUTE: &str = "data-entityquery-operand";
/// Declared value type: `EQString`, `EQGroup` or absent for auto-typing.
pub const TYPE_ATTRIBUTE: &str = "data-entityquery-type";
/// Display override on a value's context element.
pub const PRETTY_VALUE_ATTRIBUTE: &str = "data-entityquery-pretty-value";
/// Class of the hidden field the rendered query is written into.
pub const FILTER_FIELD_CLASS: &str = "js-entity-query-filter";

const CHANGE_RECEIVER: &str = "entityquery.filter";

/// The condition recipe declared by one filter control: which property,
/// which operator, which value type.
#[derive(Debug, Clone)]
pub struct PropertyControl {
    property: String,
    operand: EntityQueryOps,
    declared_type: DeclaredType,
}

impl PropertyControl {
    /// Reads the recipe from a control's `data-entityquery-*` attributes.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingAttribute`] when the property or
    /// operand attribute is absent, or an
    /// [`EntityQueryError`](adminui_rs_query::EntityQueryError) when the
    /// operand token is unknown.
    pub fn from_element(element: &Element) -> Result<Self, FilterError> {
        let property = element
            .attribute(PROPERTY_ATTRIBUTE)
            .ok_or(FilterError::MissingAttribute(PROPERTY_ATTRIBUTE))?;
        let token = element
            .attribute(OPERAND_ATTRIBUTE)
            .ok_or(FilterError::MissingAttribute(OPERAND_ATTRIBUTE))?;
        Ok(Self {
            property,
            operand: EntityQueryOps::for_token(&token)?,
            declared_type: DeclaredType::from_attribute(
                element.attribute(TYPE_ATTRIBUTE).as_deref(),
            ),
        })
    }

    /// Returns the filtered property name.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Builds the condition for the adapter's current value, or `None` when
    /// no usable value remains. A group argument switches the operator to
    /// its multi-value form (`=` becomes `in`).
    pub fn condition_for(&self, adapter: &dyn ControlAdapter) -> Option<EntityQueryCondition> {
        let argument = convert(self.declared_type, &adapter.get_value())?;
        let operand = if matches!(argument, adminui_rs_query::EQType::Group(_)) {
            EntityQueryOps::resolve_multi_value_operand(self.operand).unwrap_or(self.operand)
        } else {
            self.operand
        };
        Some(EntityQueryCondition::new(
            self.property.clone(),
            operand,
            [argument],
        ))
    }
}

#[derive(Debug)]
struct ConditionSlot {
    property: String,
    condition: Option<EntityQueryCondition>,
}

#[derive(Debug)]
struct FilterInner {
    hidden_field: Element,
    slots: RefCell<Vec<ConditionSlot>>,
}

impl FilterInner {
    fn set_condition(&self, property: &str, condition: Option<EntityQueryCondition>) {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.iter_mut().find(|slot| slot.property == property) {
            slot.condition = condition;
        } else {
            slots.push(ConditionSlot {
                property: property.to_string(),
                condition,
            });
        }
    }

    fn query(&self) -> EntityQuery {
        let mut query = EntityQuery::all();
        for slot in self.slots.borrow().iter() {
            if let Some(condition) = &slot.condition {
                query.add(condition.clone());
            }
        }
        query
    }

    fn write(&self) {
        self.hidden_field.set_value(self.query().to_string());
    }
}

/// The filter control of one form: an ordered set of condition slots, one
/// per bound property control, assembled into a single `and` query.
///
/// Slots keep the document order of the controls that created them, so the
/// rendered query is stable across value changes. On every adapter change
/// the affected slot is replaced, the query rebuilt from all slots and its
/// rendering written into the form's hidden filter field. Initial binding
/// populates the slots without touching the hidden field, which still
/// carries the server-rendered query.
#[derive(Debug, Clone)]
pub struct EntityQueryFilterControl {
    inner: Rc<FilterInner>,
}

impl EntityQueryFilterControl {
    /// Wires a filter form: initializes adapters over the form, binds every
    /// control carrying [`PROPERTY_ATTRIBUTE`] and subscribes to its
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingFilterField`] when the form has no
    /// hidden query field, or propagates adapter/attribute failures of the
    /// individual controls.
    pub fn attach(
        registry: &ControlAdapterRegistry,
        form: &Element,
    ) -> Result<Self, FilterError> {
        let hidden_field = form
            .find_first(|el| el.has_class(FILTER_FIELD_CLASS))
            .ok_or(FilterError::MissingFilterField(FILTER_FIELD_CLASS))?;
        registry.initialize_control_adapters(form)?;

        let inner = Rc::new(FilterInner {
            hidden_field,
            slots: RefCell::new(Vec::new()),
        });

        for element in form.find_all(|el| el.attribute(PROPERTY_ATTRIBUTE).is_some()) {
            let Some(adapter) = adapter_for(&element) else {
                debug!(
                    tag = element.tag(),
                    "filter control has no adapter, skipping"
                );
                continue;
            };
            let control = PropertyControl::from_element(&element)?;
            inner.set_condition(control.property(), control.condition_for(&*adapter));

            let weak = Rc::downgrade(&inner);
            let control = Rc::new(control);
            adapter.on_change(
                CHANGE_RECEIVER,
                Rc::new(move |adapter| {
                    if let Some(inner) = weak.upgrade() {
                        inner.set_condition(control.property(), control.condition_for(adapter));
                        inner.write();
                    }
                }),
            );
        }

        Ok(Self { inner })
    }

    /// Returns the query assembled from all current condition slots.
    #[must_use]
    pub fn query(&self) -> EntityQuery {
        self.inner.query()
    }

    /// Installs or clears a condition and rewrites the hidden field.
    pub fn set_condition(&self, property: &str, condition: Option<EntityQueryCondition>) {
        self.inner.set_condition(property, condition);
        self.inner.write();
    }
}
