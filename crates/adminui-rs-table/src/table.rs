//! The paged, sortable table component.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use adminui_rs_controls::ControlAdapterRegistry;
use adminui_rs_dom::{Element, Event};
use adminui_rs_query::{Direction, SortOrder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::TableError;
use crate::loader::{FragmentLoader, LoadError};
use crate::params::{PageParams, PARAMS_DATA_KEY, PARTIAL_FRAGMENT, PARTIAL_PARAMETER};

/// Marks an element as a paged table (`data-tbl-type="paged"`).
pub const TABLE_TYPE_ATTRIBUTE: &str = "data-tbl-type";

/// Dispatched before default parameters are finalized. Listeners may mutate
/// the pending [`PageParams`] or prevent the default preparation.
pub const PREPARE_DATA_EVENT: &str = "sortableTable:prepareData";
/// Dispatched before data is loaded. Preventing the default replaces the
/// built-in load behavior entirely.
pub const LOAD_DATA_EVENT: &str = "sortableTable:loadData";
/// Dispatched after a fragment has been spliced in and re-initialized.
pub const NEW_DATA_LOADED_EVENT: &str = "sortableTable:newDataLoaded";

const CURRENT_PAGE_ATTRIBUTE: &str = "data-tbl-current-page";
const PAGE_SIZE_ATTRIBUTE: &str = "data-tbl-size";
const TOTAL_PAGES_ATTRIBUTE: &str = "data-tbl-total-pages";
const SORT_ATTRIBUTE: &str = "data-tbl-sort";
const FORM_ATTRIBUTE: &str = "data-tbl-form";
const AJAX_ATTRIBUTE: &str = "data-tbl-ajax-load";
const BASE_URL_ATTRIBUTE: &str = "data-tbl-base-url";
const SORT_PROPERTY_ATTRIBUTE: &str = "data-tbl-sort-property";
const PAGE_ATTRIBUTE: &str = "data-tbl-page";
const PAGE_SELECTOR_ATTRIBUTE: &str = "data-tbl-page-selector";

const ASCENDING_CLASS: &str = "asc";
const DESCENDING_CLASS: &str = "desc";
const ERROR_CLASS: &str = "has-error";

const LISTENER_ID: &str = "adminui.table";

const MAX_LOAD_ATTEMPTS: u32 = 5;

/// One entry of the `data-tbl-sort` JSON attribute.
#[derive(Deserialize)]
struct SortEntry {
    prop: String,
    dir: String,
}

struct TableInner {
    element: Element,
    form: Option<Element>,
    registry: Rc<ControlAdapterRegistry>,
    loader: RefCell<Option<Rc<dyn FragmentLoader>>>,
    page: Cell<usize>,
    size: Cell<usize>,
    total_pages: Cell<usize>,
    sort: RefCell<Vec<SortOrder>>,
    ajax: Cell<bool>,
    loading: Cell<bool>,
    last_navigation: RefCell<Option<String>>,
}

/// A server-rendered table with paging and sorting behavior attached.
///
/// The table element carries its state in `data-tbl-*` attributes. After
/// [`SortableTable::attach`], pager cells (`data-tbl-page`), sortable
/// headings (`data-tbl-sort-property`) and the page-selector input
/// (`data-tbl-page-selector`) drive page moves; data is reloaded through the
/// owning form, through a [`FragmentLoader`], or by producing a navigation
/// URL when neither applies.
#[derive(Clone)]
pub struct SortableTable {
    inner: Rc<TableInner>,
}

impl SortableTable {
    /// Attaches table behavior to an element.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when a required `data-tbl-*` attribute is
    /// missing or malformed.
    pub fn attach(
        registry: Rc<ControlAdapterRegistry>,
        element: &Element,
    ) -> Result<Self, TableError> {
        let form = element
            .attribute(FORM_ATTRIBUTE)
            .and_then(|name| find_form(element, &name));
        let inner = Rc::new(TableInner {
            element: element.clone(),
            form,
            registry,
            loader: RefCell::new(None),
            page: Cell::new(0),
            size: Cell::new(0),
            total_pages: Cell::new(1),
            sort: RefCell::new(Vec::new()),
            ajax: Cell::new(false),
            loading: Cell::new(false),
            last_navigation: RefCell::new(None),
        });
        refresh_state(&inner)?;
        wire(&inner);
        update_sort_classes(&inner);
        Ok(Self { inner })
    }

    /// Installs the fragment loader used for ajax-style reloads.
    pub fn set_fragment_loader(&self, loader: Rc<dyn FragmentLoader>) {
        *self.inner.loader.borrow_mut() = Some(loader);
    }

    /// Moves to a 0-based page, dispatching the prepare and load events.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the load fails.
    pub fn move_to_page(&self, page: usize) -> Result<(), TableError> {
        move_to_page(&self.inner, page)
    }

    /// Makes `property` the primary sort, toggling its direction when it
    /// already is, then reloads the current page.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] when the reload fails.
    pub fn sort_on_property(&self, property: &str) -> Result<(), TableError> {
        sort_on_property(&self.inner, property)
    }

    /// Returns the current 0-based page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.inner.page.get()
    }

    /// Returns the page size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.size.get()
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.inner.total_pages.get()
    }

    /// Returns the active sort orders, most significant first.
    #[must_use]
    pub fn sort(&self) -> Vec<SortOrder> {
        self.inner.sort.borrow().clone()
    }

    /// Returns the table element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.inner.element
    }

    /// Returns the URL produced by the most recent form-less page move.
    ///
    /// The host environment is expected to navigate there.
    #[must_use]
    pub fn last_navigation(&self) -> Option<String> {
        self.inner.last_navigation.borrow().clone()
    }
}

fn find_form(element: &Element, name: &str) -> Option<Element> {
    let root = element.closest(|el| el.parent().is_none())?;
    let matches =
        |el: &Element| el.tag() == "form" && el.attribute("name").as_deref() == Some(name);
    if matches(&root) {
        return Some(root);
    }
    root.find_first(matches)
}

fn read_usize_attribute(element: &Element, attribute: &'static str) -> Result<usize, TableError> {
    let value = element
        .attribute(attribute)
        .ok_or(TableError::MissingAttribute(attribute))?;
    value
        .trim()
        .parse()
        .map_err(|_| TableError::MalformedAttribute { attribute, value })
}

fn refresh_state(inner: &Rc<TableInner>) -> Result<(), TableError> {
    inner
        .page
        .set(read_usize_attribute(&inner.element, CURRENT_PAGE_ATTRIBUTE)?);
    inner
        .size
        .set(read_usize_attribute(&inner.element, PAGE_SIZE_ATTRIBUTE)?);
    inner
        .total_pages
        .set(read_usize_attribute(&inner.element, TOTAL_PAGES_ATTRIBUTE)?);
    inner.ajax.set(
        inner
            .element
            .attribute(AJAX_ATTRIBUTE)
            .is_some_and(|v| v == "true"),
    );

    let mut sort = Vec::new();
    if let Some(raw) = inner.element.attribute(SORT_ATTRIBUTE) {
        let entries: Vec<SortEntry> = serde_json::from_str(&raw)?;
        for entry in entries {
            sort.push(SortOrder::new(entry.prop, Direction::parse(&entry.dir)?));
        }
    }
    *inner.sort.borrow_mut() = sort;
    Ok(())
}

fn wire(inner: &Rc<TableInner>) {
    for pager in inner
        .element
        .find_all(|el| el.attribute(PAGE_ATTRIBUTE).is_some())
    {
        let weak = Rc::downgrade(inner);
        pager.add_event_listener(
            "click",
            LISTENER_ID,
            Rc::new(move |event: &Event| {
                event.prevent_default();
                event.stop_propagation();
                if let Some(inner) = weak.upgrade() {
                    pager_clicked(&inner, event);
                }
            }),
        );
    }

    for selector in inner
        .element
        .find_all(|el| el.attribute(PAGE_SELECTOR_ATTRIBUTE).is_some())
    {
        let weak = Rc::downgrade(inner);
        let input = selector.clone();
        selector.add_event_listener(
            "keydown",
            LISTENER_ID,
            Rc::new(move |event: &Event| {
                if event.key().as_deref() != Some("Enter") {
                    return;
                }
                event.prevent_default();
                if let Some(inner) = weak.upgrade() {
                    page_selected(&inner, &input);
                }
            }),
        );
    }

    for heading in inner
        .element
        .find_all(|el| el.attribute(SORT_PROPERTY_ATTRIBUTE).is_some())
    {
        let weak = Rc::downgrade(inner);
        let property = heading.attribute(SORT_PROPERTY_ATTRIBUTE).unwrap_or_default();
        heading.add_event_listener(
            "click",
            LISTENER_ID,
            Rc::new(move |event: &Event| {
                event.prevent_default();
                event.stop_propagation();
                if let Some(inner) = weak.upgrade() {
                    if let Err(error) = sort_on_property(&inner, &property) {
                        warn!(property = %property, %error, "sorting table failed");
                    }
                }
            }),
        );
    }

    if let Some(form) = &inner.form {
        let weak = Rc::downgrade(inner);
        form.add_event_listener(
            "submit",
            LISTENER_ID,
            Rc::new(move |event: &Event| {
                if let Some(inner) = weak.upgrade() {
                    // An ajax table intercepts its form and reloads in place.
                    if inner.ajax.get() && !inner.loading.get() {
                        event.prevent_default();
                        let page = inner.page.get();
                        if let Err(error) = move_to_page(&inner, page) {
                            warn!(%error, "reloading table on form submit failed");
                        }
                    }
                }
            }),
        );
    }
}

fn pager_clicked(inner: &Rc<TableInner>, event: &Event) {
    let Some(target) = event.target() else { return };
    let Some(cell) = target.closest(|el| el.attribute(PAGE_ATTRIBUTE).is_some()) else {
        return;
    };
    let raw = cell.attribute(PAGE_ATTRIBUTE).unwrap_or_default();
    match raw.trim().parse::<usize>() {
        Ok(page) => {
            if let Err(error) = move_to_page(inner, page) {
                warn!(page, %error, "moving to page failed");
            }
        }
        Err(_) => warn!(value = %raw, "pager cell holds a non-numeric page"),
    }
}

fn page_selected(inner: &Rc<TableInner>, input: &Element) {
    let Ok(number) = input.value().trim().parse::<i64>() else {
        input.add_class(ERROR_CLASS);
        return;
    };
    input.remove_class(ERROR_CLASS);
    let total = inner.total_pages.get().max(1) as i64;
    let clamped = number.clamp(1, total) as usize;
    if let Err(error) = move_to_page(inner, clamped - 1) {
        warn!(page = clamped - 1, %error, "moving to selected page failed");
    }
}

fn move_to_page(inner: &Rc<TableInner>, page: usize) -> Result<(), TableError> {
    let params = Rc::new(RefCell::new(PageParams {
        page,
        size: inner.size.get(),
        sort: inner
            .sort
            .borrow()
            .iter()
            .map(|order| format!("{},{}", order.property(), order.direction()))
            .collect(),
        extra: Vec::new(),
    }));
    inner
        .element
        .set_data(PARAMS_DATA_KEY, Rc::clone(&params) as Rc<dyn std::any::Any>);

    let prepare = Event::new(PREPARE_DATA_EVENT);
    inner.element.dispatch(&prepare);
    if !prepare.default_prevented() && inner.ajax.get() {
        params.borrow_mut().extra.push((
            PARTIAL_PARAMETER.to_string(),
            PARTIAL_FRAGMENT.to_string(),
        ));
    }

    let load = Event::new(LOAD_DATA_EVENT);
    inner.element.dispatch(&load);
    let result = if load.default_prevented() {
        Ok(())
    } else {
        let snapshot = params.borrow().clone();
        load_data(inner, &snapshot)
    };
    inner.element.remove_data(PARAMS_DATA_KEY);
    result
}

fn load_data(inner: &Rc<TableInner>, params: &PageParams) -> Result<(), TableError> {
    if let Some(form) = &inner.form {
        for (name, values) in params.grouped_entries() {
            require_hidden_element(form, &name, &values);
        }
        if inner.ajax.get() {
            load_with_ajax(inner, params, form)
        } else {
            form.dispatch(&Event::new("submit"));
            Ok(())
        }
    } else {
        let base = inner
            .element
            .attribute(BASE_URL_ATTRIBUTE)
            .unwrap_or_default();
        let url = format!("{base}?{}", params.to_query_string());
        debug!(%url, "table navigation requested");
        *inner.last_navigation.borrow_mut() = Some(url);
        Ok(())
    }
}

/// Carries a parameter into the form as hidden inputs: stale hidden inputs
/// with the same name are dropped, an existing visible control is updated
/// in place, multi-valued parameters get one hidden input per value.
fn require_hidden_element(form: &Element, name: &str, values: &[String]) {
    let values: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return;
    }
    for stale in form.find_all(|el| {
        el.attribute("name").as_deref() == Some(name)
            && el.attribute("type").as_deref() == Some("hidden")
    }) {
        if let Some(parent) = stale.parent() {
            parent.remove_child(&stale);
        }
    }
    if let [single] = values.as_slice() {
        if let Some(control) = form.find_first(|el| el.attribute("name").as_deref() == Some(name))
        {
            control.set_value((*single).clone());
            return;
        }
    }
    for value in values {
        let hidden = Element::new("input")
            .with_attribute("type", "hidden")
            .with_attribute("name", name);
        hidden.set_value(value.clone());
        form.append_child(hidden);
    }
}

fn load_with_ajax(
    inner: &Rc<TableInner>,
    params: &PageParams,
    form: &Element,
) -> Result<(), TableError> {
    let loader = inner
        .loader
        .borrow()
        .clone()
        .ok_or(TableError::NoLoader)?;
    inner.loading.set(true);

    let page_entries = params.entries();
    let mut entries = serialize_form(form);
    entries.retain(|(name, _)| !page_entries.iter().any(|(page_name, _)| page_name == name));
    entries.extend(page_entries);

    let url = inner
        .element
        .attribute(BASE_URL_ATTRIBUTE)
        .unwrap_or_else(|| "#".to_string());

    let mut last_error: Option<LoadError> = None;
    for attempt in 1..=MAX_LOAD_ATTEMPTS {
        match loader.load(&url, &entries) {
            Ok(fragment) => {
                let result = apply_fragment(inner, &fragment);
                inner.loading.set(false);
                return result;
            }
            Err(error) => {
                warn!(attempt, %error, "loading table fragment failed");
                last_error = Some(error);
            }
        }
    }
    inner.loading.set(false);
    Err(TableError::LoadFailed {
        attempts: MAX_LOAD_ATTEMPTS,
        source: last_error.unwrap_or_else(|| LoadError::new("no attempt was made")),
    })
}

fn apply_fragment(inner: &Rc<TableInner>, fragment: &Element) -> Result<(), TableError> {
    for attribute in [
        CURRENT_PAGE_ATTRIBUTE,
        PAGE_SIZE_ATTRIBUTE,
        TOTAL_PAGES_ATTRIBUTE,
        SORT_ATTRIBUTE,
    ] {
        if let Some(value) = fragment.attribute(attribute) {
            inner.element.set_attribute(attribute, value);
        }
    }
    inner.element.replace_children(fragment.children());
    refresh_state(inner)?;
    wire(inner);
    update_sort_classes(inner);
    inner.registry.initialize_control_adapters(&inner.element)?;
    inner.element.dispatch(&Event::new(NEW_DATA_LOADED_EVENT));
    Ok(())
}

fn sort_on_property(inner: &Rc<TableInner>, property: &str) -> Result<(), TableError> {
    {
        let mut sort = inner.sort.borrow_mut();
        let mut direction = Direction::Asc;
        if let Some(index) = sort.iter().position(|order| order.property() == property) {
            if index == 0 {
                direction = sort[index].direction().toggled();
            }
            sort.remove(index);
        }
        sort.insert(0, SortOrder::new(property, direction));
    }
    update_sort_classes(inner);
    move_to_page(inner, inner.page.get())
}

/// Only the primary sort property is marked with a direction class.
fn update_sort_classes(inner: &Rc<TableInner>) {
    let primary = inner.sort.borrow().first().cloned();
    for heading in inner
        .element
        .find_all(|el| el.attribute(SORT_PROPERTY_ATTRIBUTE).is_some())
    {
        heading.remove_class(ASCENDING_CLASS);
        heading.remove_class(DESCENDING_CLASS);
        if let Some(order) = &primary {
            if heading.attribute(SORT_PROPERTY_ATTRIBUTE).as_deref() == Some(order.property()) {
                heading.add_class(match order.direction() {
                    Direction::Asc => ASCENDING_CLASS,
                    Direction::Desc => DESCENDING_CLASS,
                });
            }
        }
    }
}

fn serialize_form(form: &Element) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for element in form.descendants() {
        let Some(name) = element.attribute("name") else {
            continue;
        };
        match element.tag().as_str() {
            "input" => {
                let input_type = element
                    .attribute("type")
                    .unwrap_or_else(|| "text".to_string());
                match input_type.as_str() {
                    "checkbox" | "radio" => {
                        if element.is_checked() {
                            let value = element.value();
                            let value = if value.is_empty() {
                                "on".to_string()
                            } else {
                                value
                            };
                            entries.push((name, value));
                        }
                    }
                    "submit" | "button" => {}
                    _ => entries.push((name, element.value())),
                }
            }
            "textarea" => entries.push((name, element.value())),
            "select" => {
                for option in
                    element.find_all(|el| el.tag() == "option" && el.is_selected())
                {
                    let value = option.attribute("value").unwrap_or_else(|| option.text());
                    entries.push((name.clone(), value));
                }
            }
            _ => {}
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminui_rs_controls::default_registry;
    use crate::params::pending_params;

    fn paged_table() -> Element {
        Element::new("table")
            .with_attribute(TABLE_TYPE_ATTRIBUTE, "paged")
            .with_attribute(CURRENT_PAGE_ATTRIBUTE, "2")
            .with_attribute(PAGE_SIZE_ATTRIBUTE, "20")
            .with_attribute(TOTAL_PAGES_ATTRIBUTE, "5")
            .with_attribute(
                SORT_ATTRIBUTE,
                r#"[{"prop":"name","dir":"ASC"},{"prop":"city","dir":"DESC"}]"#,
            )
    }

    fn attach(element: &Element) -> SortableTable {
        SortableTable::attach(Rc::new(default_registry()), element).unwrap()
    }

    #[test]
    fn test_attach_reads_state() {
        let table = attach(&paged_table());
        assert_eq!(table.page(), 2);
        assert_eq!(table.size(), 20);
        assert_eq!(table.total_pages(), 5);
        assert_eq!(
            table.sort(),
            vec![SortOrder::asc("name"), SortOrder::desc("city")]
        );
    }

    #[test]
    fn test_attach_requires_page_attributes() {
        let element = Element::new("table").with_attribute(TABLE_TYPE_ATTRIBUTE, "paged");
        let result = SortableTable::attach(Rc::new(default_registry()), &element);
        assert!(matches!(
            result,
            Err(TableError::MissingAttribute(CURRENT_PAGE_ATTRIBUTE))
        ));
    }

    #[test]
    fn test_malformed_page_attribute() {
        let element = paged_table();
        element.set_attribute(CURRENT_PAGE_ATTRIBUTE, "two");
        let result = SortableTable::attach(Rc::new(default_registry()), &element);
        assert!(matches!(
            result,
            Err(TableError::MalformedAttribute { .. })
        ));
    }

    #[test]
    fn test_move_to_page_without_form_produces_navigation_url() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let table = attach(&element);
        table.move_to_page(3).unwrap();
        assert_eq!(
            table.last_navigation().unwrap(),
            "/users?page=3&size=20&sort=name%2CASC&sort=city%2CDESC"
        );
    }

    #[test]
    fn test_prepare_listener_can_mutate_params() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let table = attach(&element);
        let observed = element.clone();
        element.add_event_listener(
            PREPARE_DATA_EVENT,
            "test",
            Rc::new(move |_| {
                if let Some(params) = pending_params(&observed) {
                    params
                        .borrow_mut()
                        .extra
                        .push(("view".to_string(), "summary".to_string()));
                }
            }),
        );
        table.move_to_page(0).unwrap();
        assert!(table
            .last_navigation()
            .unwrap()
            .ends_with("view=summary"));
    }

    #[test]
    fn test_load_listener_preventing_default_skips_loading() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let table = attach(&element);
        element.add_event_listener(
            LOAD_DATA_EVENT,
            "test",
            Rc::new(|event: &Event| event.prevent_default()),
        );
        table.move_to_page(1).unwrap();
        assert!(table.last_navigation().is_none());
    }

    #[test]
    fn test_sort_on_property_toggles_primary() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let table = attach(&element);
        table.sort_on_property("name").unwrap();
        assert_eq!(table.sort()[0], SortOrder::desc("name"));
        table.sort_on_property("city").unwrap();
        assert_eq!(
            table.sort(),
            vec![SortOrder::asc("city"), SortOrder::desc("name")]
        );
    }

    #[test]
    fn test_sort_classes_follow_primary_order() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let name_heading =
            Element::new("th").with_attribute(SORT_PROPERTY_ATTRIBUTE, "name");
        let city_heading =
            Element::new("th").with_attribute(SORT_PROPERTY_ATTRIBUTE, "city");
        element.append_child(name_heading.clone());
        element.append_child(city_heading.clone());

        let table = attach(&element);
        assert!(name_heading.has_class("asc"));
        assert!(!city_heading.has_class("asc"));

        table.sort_on_property("name").unwrap();
        assert!(name_heading.has_class("desc"));

        table.sort_on_property("city").unwrap();
        assert!(city_heading.has_class("asc"));
        assert!(!name_heading.has_class("asc"));
        assert!(!name_heading.has_class("desc"));
    }

    #[test]
    fn test_pager_click_moves_page() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let pager = Element::new("a").with_attribute(PAGE_ATTRIBUTE, "4");
        element.append_child(pager.clone());
        let table = attach(&element);

        pager.dispatch(&Event::new("click"));
        assert!(table.last_navigation().unwrap().contains("page=4"));
    }

    #[test]
    fn test_page_selector_clamps_and_flags_errors() {
        let element = paged_table().with_attribute(BASE_URL_ATTRIBUTE, "/users");
        let selector = Element::new("input").with_attribute(PAGE_SELECTOR_ATTRIBUTE, "");
        element.append_child(selector.clone());
        let table = attach(&element);

        selector.set_value("not a number");
        selector.dispatch(&Event::new("keydown").with_key("Enter"));
        assert!(selector.has_class("has-error"));
        assert!(table.last_navigation().is_none());

        selector.set_value("99");
        selector.dispatch(&Event::new("keydown").with_key("Enter"));
        assert!(!selector.has_class("has-error"));
        // Clamped to the last page, 0-based.
        assert!(table.last_navigation().unwrap().contains("page=4"));

        selector.set_value("-3");
        selector.dispatch(&Event::new("keydown").with_key("Enter"));
        assert!(table.last_navigation().unwrap().contains("page=0"));
    }

    #[test]
    fn test_form_receives_hidden_inputs_and_submit() {
        let form = Element::new("form").with_attribute("name", "userFilter");
        let root = Element::new("body");
        let element = paged_table().with_attribute(FORM_ATTRIBUTE, "userFilter");
        root.append_child(form.clone());
        root.append_child(element.clone());

        let submits = Rc::new(Cell::new(0));
        let count = Rc::clone(&submits);
        form.add_event_listener(
            "submit",
            "test",
            Rc::new(move |_| count.set(count.get() + 1)),
        );

        let table = attach(&element);
        table.move_to_page(3).unwrap();

        assert_eq!(submits.get(), 1);
        let page_input = form
            .find_first(|el| el.attribute("name").as_deref() == Some("page"))
            .unwrap();
        assert_eq!(page_input.value(), "3");
        let sorts = form.find_all(|el| el.attribute("name").as_deref() == Some("sort"));
        assert_eq!(sorts.len(), 2);
        assert_eq!(sorts[0].value(), "name,ASC");
        assert_eq!(sorts[1].value(), "city,DESC");
    }

    #[test]
    fn test_stale_hidden_inputs_are_replaced() {
        let form = Element::new("form").with_attribute("name", "userFilter");
        for stale in ["old,ASC", "older,DESC"] {
            let input = Element::new("input")
                .with_attribute("type", "hidden")
                .with_attribute("name", "sort");
            input.set_value(stale);
            form.append_child(input);
        }
        let root = Element::new("body");
        let element = paged_table().with_attribute(FORM_ATTRIBUTE, "userFilter");
        root.append_child(form.clone());
        root.append_child(element.clone());

        let table = attach(&element);
        table.move_to_page(0).unwrap();

        let sorts = form.find_all(|el| el.attribute("name").as_deref() == Some("sort"));
        assert_eq!(sorts.len(), 2);
        assert_eq!(sorts[0].value(), "name,ASC");
        assert_eq!(sorts[1].value(), "city,DESC");
    }

    #[test]
    fn test_serialize_form_skips_unchecked_and_buttons() {
        let form = Element::new("form");
        let text = Element::new("input").with_attribute("name", "q");
        text.set_value("jane");
        let unchecked = Element::new("input")
            .with_attribute("type", "checkbox")
            .with_attribute("name", "active");
        let checked = Element::new("input")
            .with_attribute("type", "checkbox")
            .with_attribute("name", "admin");
        checked.set_checked(true);
        let button = Element::new("input")
            .with_attribute("type", "submit")
            .with_attribute("name", "go");
        let select = Element::new("select").with_attribute("name", "city");
        let option = Element::new("option").with_attribute("value", "213");
        option.set_selected(true);
        select.append_child(option);
        for el in [text, unchecked, checked, button] {
            form.append_child(el);
        }
        form.append_child(select);

        assert_eq!(
            serialize_form(&form),
            vec![
                ("q".to_string(), "jane".to_string()),
                ("admin".to_string(), "on".to_string()),
                ("city".to_string(), "213".to_string()),
            ]
        );
    }
}
