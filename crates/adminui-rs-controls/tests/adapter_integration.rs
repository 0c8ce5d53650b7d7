//! Integration tests for registry scans over realistic form fragments.

use std::cell::Cell;
use std::rc::Rc;

use adminui_rs_controls::adapters::container::ContainerControlAdapter;
use adminui_rs_controls::{
    adapter_for, default_registry, ControlAdapter, SelectableValue, ADAPTER_TYPE_ATTRIBUTE,
};
use adminui_rs_dom::{Element, Event};

/// A filter form fragment the way the server renders it: a text input, a
/// labeled checkbox and a select wrapped in a container.
fn filter_form() -> Element {
    let name_input = Element::new("input")
        .with_attribute("type", "text")
        .with_attribute("name", "name")
        .with_attribute(ADAPTER_TYPE_ATTRIBUTE, "basic");

    let checkbox = Element::new("input")
        .with_attribute("type", "checkbox")
        .with_attribute("name", "active")
        .with_attribute(ADAPTER_TYPE_ATTRIBUTE, "checkbox");
    let checkbox_label = Element::new("label")
        .with_text("Active")
        .with_child(checkbox);

    let city_select = Element::new("select")
        .with_attribute("name", "city")
        .with_attribute(ADAPTER_TYPE_ATTRIBUTE, "select")
        .with_child(
            Element::new("option")
                .with_attribute("value", "213")
                .with_text("Antwerp"),
        )
        .with_child(
            Element::new("option")
                .with_attribute("value", "847")
                .with_text("Ghent"),
        );

    let container = Element::new("div")
        .with_attribute(ADAPTER_TYPE_ATTRIBUTE, "container")
        .with_child(name_input)
        .with_child(checkbox_label)
        .with_child(city_select);

    Element::new("form")
        .with_attribute("name", "entityFilter")
        .with_child(container)
}

#[test]
fn test_scan_builds_all_adapters_once() {
    let registry = default_registry();
    let form = filter_form();
    registry.initialize_control_adapters(&form).unwrap();

    let marked: Vec<Element> = form.find_all(|el| el.attribute(ADAPTER_TYPE_ATTRIBUTE).is_some());
    assert_eq!(marked.len(), 4);
    for element in &marked {
        assert!(adapter_for(element).is_some(), "{:?}", element);
    }

    let container = adapter_for(&form.children()[0]).unwrap();
    registry.initialize_control_adapters(&form).unwrap();
    assert!(Rc::ptr_eq(&container, &adapter_for(&form.children()[0]).unwrap()));
}

#[test]
fn test_container_aggregates_in_document_order() {
    let registry = default_registry();
    let form = filter_form();
    registry.initialize_control_adapters(&form).unwrap();

    let name_input = form
        .find_first(|el| el.attribute("name").as_deref() == Some("name"))
        .unwrap();
    name_input.set_value("Jos");
    let checkbox = form
        .find_first(|el| el.attribute("type").as_deref() == Some("checkbox"))
        .unwrap();
    checkbox.set_checked(true);

    let container = adapter_for(&form.children()[0]).unwrap();
    let holders = container.get_value();
    assert_eq!(holders.len(), 3);
    assert_eq!(holders[0].value(), "Jos");
    assert_eq!(holders[1].value(), "Yes");
    assert_eq!(holders[1].label(), Some("Active"));
    // Single select with nothing selected still contributes one holder.
    assert_eq!(holders[2].value(), "");
}

#[test]
fn test_container_reset_restores_every_member() {
    let registry = default_registry();
    let form = filter_form();
    registry.initialize_control_adapters(&form).unwrap();
    let container = adapter_for(&form.children()[0]).unwrap();

    let name_input = form
        .find_first(|el| el.attribute("name").as_deref() == Some("name"))
        .unwrap();
    name_input.set_value("Jos");
    let checkbox = form
        .find_first(|el| el.attribute("type").as_deref() == Some("checkbox"))
        .unwrap();
    checkbox.set_checked(true);

    container.reset();
    assert_eq!(name_input.value(), "");
    assert!(!checkbox.is_checked());
    assert!(matches!(
        container.select_value(SelectableValue::Text("x".to_string())),
        Err(_)
    ));
}

#[test]
fn test_member_change_notifies_member_observers_only() {
    let registry = default_registry();
    let form = filter_form();
    registry.initialize_control_adapters(&form).unwrap();

    let name_input = form
        .find_first(|el| el.attribute("name").as_deref() == Some("name"))
        .unwrap();
    let member = adapter_for(&name_input).unwrap();
    let container = adapter_for(&form.children()[0]).unwrap();

    let member_hits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&member_hits);
    member.on_change("counter", Rc::new(move |_| seen.set(seen.get() + 1)));
    let container_hits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&container_hits);
    container.on_change("counter", Rc::new(move |_| seen.set(seen.get() + 1)));

    name_input.dispatch(&Event::new("change"));
    assert_eq!(member_hits.get(), 1);
    assert_eq!(container_hits.get(), 0);
}

#[test]
fn test_container_built_directly_reuses_scanned_members() {
    let registry = default_registry();
    let form = filter_form();
    let container_el = form.children()[0].clone();
    let container = ContainerControlAdapter::attach(&registry, &container_el).unwrap();

    let name_input = form
        .find_first(|el| el.attribute("name").as_deref() == Some("name"))
        .unwrap();
    assert!(Rc::ptr_eq(
        &container.members()[0],
        &adapter_for(&name_input).unwrap()
    ));
}
