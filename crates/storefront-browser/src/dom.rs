// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Small DOM helpers shared by the wiring modules.
//!
//! Listeners live as long as the page, so their closures are leaked on
//! registration.

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, FormData, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList, Window,
};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Every element of the document matching `selector`, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(&document.query_selector_all(selector)?))
}

/// Every descendant of `root` matching `selector`, in document order.
pub(crate) fn query_within(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(&root.query_selector_all(selector)?))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Run `handler` on every `kind` event dispatched at `target`.
pub(crate) fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Replace the `onclick` handler of `element`, so repeated wiring does not
/// stack handlers.
pub(crate) fn on_click<F>(element: &Element, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    html.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

/// Set `style.display` when `element` is an HTML element.
pub(crate) fn set_display(element: &Element, display: &str) {
    set_style(element, "display", display);
}

pub(crate) fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = html.style().set_property(property, value) {
            crate::console::error(&format!("cannot set {property}"), &err);
        }
    }
}

/// Set the text of the first `selector` match under `root`, if any.
pub(crate) fn set_text_in(root: &Element, selector: &str, text: &str) {
    if let Ok(Some(target)) = root.query_selector(selector) {
        target.set_text_content(Some(text));
    }
}

/// Trimmed text of the first `selector` match under `root`.
pub(crate) fn text_in(root: &Element, selector: &str) -> String {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Set the value of a form control, whatever its element type.
pub(crate) fn set_value(control: &Element, value: &str) {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// String fields of `form`; file fields are skipped.
pub(crate) fn form_fields(form: &HtmlFormElement) -> Result<BTreeMap<String, String>, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = BTreeMap::new();
    let Some(entries) = js_sys::try_iter(&data)? else {
        return Ok(fields);
    };
    for entry in entries {
        let pair = js_sys::Array::from(&entry?);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.insert(name, value);
        }
    }
    Ok(fields)
}

/// A global set by the page template, if present.
pub(crate) fn global(window: &Window, path: &[&str]) -> Option<JsValue> {
    let mut value: JsValue = window.clone().into();
    for key in path {
        value = js_sys::Reflect::get(&value, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
    }
    Some(value)
}
