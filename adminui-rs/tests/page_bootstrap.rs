//! End-to-end page bootstrap: one node tree holding a filter form and a
//! paged table, wired through [`AdminUi`].

use std::cell::RefCell;
use std::rc::Rc;

use adminui_rs::controls::{adapter_for, ADAPTER_TYPE_ATTRIBUTE};
use adminui_rs::dom::{Element, Event};
use adminui_rs::filter::{FILTER_FIELD_CLASS, OPERAND_ATTRIBUTE, PROPERTY_ATTRIBUTE};
use adminui_rs::table::{FragmentLoader, LoadError, TABLE_TYPE_ATTRIBUTE};
use adminui_rs::AdminUi;

fn page() -> Element {
    let form = Element::new("form")
        .with_attribute("name", "userFilter")
        .with_child(
            Element::new("input")
                .with_attribute("type", "text")
                .with_attribute(ADAPTER_TYPE_ATTRIBUTE, "basic")
                .with_attribute(PROPERTY_ATTRIBUTE, "name")
                .with_attribute(OPERAND_ATTRIBUTE, "like"),
        )
        .with_child(
            Element::new("input")
                .with_attribute("type", "hidden")
                .with_attribute("name", "filter")
                .with_attribute("class", FILTER_FIELD_CLASS),
        );

    let table = Element::new("table")
        .with_attribute(TABLE_TYPE_ATTRIBUTE, "paged")
        .with_attribute("data-tbl-current-page", "0")
        .with_attribute("data-tbl-size", "25")
        .with_attribute("data-tbl-total-pages", "4")
        .with_attribute("data-tbl-form", "userFilter")
        .with_attribute("data-tbl-ajax-load", "true")
        .with_attribute("data-tbl-base-url", "/users");

    Element::new("body").with_child(form).with_child(table)
}

struct RecordingLoader {
    calls: RefCell<Vec<Vec<(String, String)>>>,
}

impl FragmentLoader for RecordingLoader {
    fn load(&self, _url: &str, params: &[(String, String)]) -> Result<Element, LoadError> {
        self.calls.borrow_mut().push(params.to_vec());
        Ok(Element::new("table")
            .with_attribute("data-tbl-current-page", "1")
            .with_attribute("data-tbl-size", "25")
            .with_attribute("data-tbl-total-pages", "4"))
    }
}

#[test]
fn test_initialize_node_wires_filter_and_table() {
    let ui = AdminUi::new();
    let page = page();
    ui.initialize_node(&page).unwrap();

    assert_eq!(ui.filters().len(), 1);
    assert_eq!(ui.tables().len(), 1);
    assert_eq!(ui.tables()[0].total_pages(), 4);

    let input = page
        .find_first(|el| el.attribute(ADAPTER_TYPE_ATTRIBUTE).is_some())
        .unwrap();
    assert!(adapter_for(&input).is_some());
}

#[test]
fn test_filter_change_reaches_hidden_field() {
    let ui = AdminUi::new();
    let page = page();
    ui.initialize_node(&page).unwrap();

    let input = page
        .find_first(|el| el.attribute(PROPERTY_ATTRIBUTE).is_some())
        .unwrap();
    input.set_value("Jos");
    input.dispatch(&Event::new("change"));

    let hidden = page
        .find_first(|el| el.has_class(FILTER_FIELD_CLASS))
        .unwrap();
    assert_eq!(hidden.value(), "name like 'Jos'");
}

#[test]
fn test_filter_value_travels_with_the_page_load() {
    let ui = AdminUi::new();
    let page = page();
    ui.initialize_node(&page).unwrap();
    let loader = Rc::new(RecordingLoader {
        calls: RefCell::new(Vec::new()),
    });
    ui.set_fragment_loader(loader.clone());

    let input = page
        .find_first(|el| el.attribute(PROPERTY_ATTRIBUTE).is_some())
        .unwrap();
    input.set_value("Jos");
    input.dispatch(&Event::new("change"));

    ui.tables()[0].move_to_page(1).unwrap();

    let calls = loader.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains(&("filter".to_string(), "name like 'Jos'".to_string())));
    assert!(calls[0].contains(&("page".to_string(), "1".to_string())));
}

#[test]
fn test_loader_installed_before_initialization_reaches_new_tables() {
    let ui = AdminUi::new();
    let loader = Rc::new(RecordingLoader {
        calls: RefCell::new(Vec::new()),
    });
    ui.set_fragment_loader(loader.clone());

    let page = page();
    ui.initialize_node(&page).unwrap();
    ui.tables()[0].move_to_page(2).unwrap();
    assert_eq!(loader.calls.borrow().len(), 1);
}
