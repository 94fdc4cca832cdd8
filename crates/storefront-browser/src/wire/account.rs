// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Profile page: past orders and saved addresses.

use std::rc::Rc;

use storefront_pages::address::{
    delete_outcome, delete_prompt, delete_request, delete_transport_outcome, submitted_outcome,
    AddressDraft, AddressType,
};
use storefront_pages::order::OrderAction;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement};

use super::Storefront;
use crate::console;
use crate::dom;

const ADDRESS_FORM: &str = "address_create_form";
const ADDRESS_TAB: &str = "tab-3";

/// Fields copied from an address card into the edit form:
/// `(card class, form control selector)`.
const EDITABLE: [(&str, &str); 7] = [
    (".address_line1", r#"textarea[name="address_line1"]"#),
    (".address_line2", r#"textarea[name="address_line2"]"#),
    (".city", r#"input[name="city"]"#),
    (".state", r#"input[name="state"]"#),
    (".country", r#"select[name="country"]"#),
    (".pincode", r#"input[name="pincode"]"#),
    (".phone", r#"input[name="phone"]"#),
];

pub(super) fn wire_orders(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for (selector, action) in [
        (".btn-order-cancel", OrderAction::Cancel),
        (".btn-reorder", OrderAction::Reorder),
    ] {
        for button in dom::query_all(&shop.document, selector)? {
            let shop = Rc::clone(shop);
            let target = button.clone();
            dom::listen(&button, "click", move |_| {
                let Some(order_id) = target.get_attribute("data-name") else {
                    return;
                };
                shop.send(action.request(&shop.api, &order_id), move |shop, reply| {
                    match reply {
                        Ok(reply) => shop.settle(&action.outcome(&reply.body), None),
                        Err(err) => console::warn(&format!("order call failed: {err}")),
                    }
                });
            })?;
        }
    }
    Ok(())
}

pub(super) fn wire_addresses(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    wire_submit(shop)?;
    wire_edit(shop)?;
    wire_form_toggle(shop)?;
    wire_delete(shop)
}

fn address_form(shop: &Storefront) -> Option<HtmlFormElement> {
    shop.document
        .get_element_by_id(ADDRESS_FORM)
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
}

fn wire_submit(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let Some(button) = shop.document.get_element_by_id("address_create_btn") else {
        return Ok(());
    };
    let shop = Rc::clone(shop);
    dom::listen(&button, "click", move |_| {
        let Some(form) = address_form(&shop) else {
            return;
        };
        let fields = match dom::form_fields(&form) {
            Ok(fields) => fields,
            Err(err) => {
                console::error("address form unreadable", &err);
                return;
            }
        };
        let request = AddressDraft::from_fields(&fields).submit_request(&shop.api, &shop.cookies);
        shop.send(request, |shop, reply| match reply {
            Ok(_) => shop.settle(&submitted_outcome(), None),
            Err(err) => console::warn(&format!("address not saved: {err}")),
        });
    })
}

fn fill_form(shop: &Storefront, button: &Element) -> Result<(), JsValue> {
    if let Some(tab) = shop.document.get_element_by_id(ADDRESS_TAB) {
        dom::set_display(&tab, "none");
    }
    let Some(form) = address_form(shop) else {
        return Ok(());
    };
    dom::set_display(&form, "block");

    if let Some(card) = button.closest("section")? {
        for (field, control) in EDITABLE {
            if let Some(control) = form.query_selector(control)? {
                dom::set_value(&control, &dom::text_in(&card, field));
            }
        }
    }

    let record_name = button.get_attribute("data-name").unwrap_or_default();
    if let Some(kind) = form.query_selector(r#"select[name="address_type"]"#)? {
        dom::set_value(&kind, AddressType::of_record(&record_name).as_str());
    }
    let hidden = match form.query_selector(r#"input[name="name"]"#)? {
        Some(hidden) => hidden,
        None => {
            let hidden = shop.document.create_element("input")?;
            hidden.set_attribute("type", "hidden")?;
            hidden.set_attribute("name", "name")?;
            form.append_child(&hidden)?;
            hidden
        }
    };
    dom::set_value(&hidden, &record_name);
    Ok(())
}

fn wire_edit(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for button in dom::query_all(&shop.document, ".address_edit")? {
        let shop = Rc::clone(shop);
        let target = button.clone();
        dom::listen(&button, "click", move |_| {
            if let Err(err) = fill_form(&shop, &target) {
                console::error("address form not filled", &err);
            }
        })?;
    }
    Ok(())
}

fn wire_form_toggle(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for (button_id, form_display, tab_display) in [
        ("addNewAddressBtn", "flex", "none"),
        ("address_create_cancel", "none", "block"),
    ] {
        let Some(button) = shop.document.get_element_by_id(button_id) else {
            continue;
        };
        let shop = Rc::clone(shop);
        dom::listen(&button, "click", move |_| {
            if let Some(tab) = shop.document.get_element_by_id(ADDRESS_TAB) {
                dom::set_display(&tab, tab_display);
            }
            if let Some(form) = shop.document.get_element_by_id(ADDRESS_FORM) {
                dom::set_display(&form, form_display);
            }
        })?;
    }
    Ok(())
}

fn wire_delete(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for button in dom::query_all(&shop.document, ".delete-address")? {
        let shop = Rc::clone(shop);
        let target = button.clone();
        dom::listen(&button, "click", move |event: Event| {
            event.prevent_default();
            let Some(record_name) = target.get_attribute("data-name") else {
                return;
            };
            if !shop
                .window
                .confirm_with_message(&delete_prompt(&record_name))
                .unwrap_or(false)
            {
                return;
            }
            let origin = target.clone();
            shop.send(delete_request(&shop.api, &record_name), move |shop, reply| {
                let outcome = match reply {
                    Ok(reply) => delete_outcome(reply.status, &reply.body),
                    Err(err) => {
                        console::warn(&format!("address delete failed: {err}"));
                        delete_transport_outcome()
                    }
                };
                shop.settle(&outcome, Some(&origin));
            });
        })?;
    }
    Ok(())
}
