// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Add-to-cart buttons and the variant picker.

use std::rc::Rc;

use storefront_pages::cart::{added_outcome, cart_failure_text, Cart};
use storefront_pages::variant::{
    attributes_request, parse_attributes, plan_add, resolved_item, AddPlan, VariantSelection,
};
use storefront_pages::Notice;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};

use super::{decoded, Storefront};
use crate::console;
use crate::dom;

pub(super) fn wire(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for button in dom::query_all(&shop.document, ".add-to-cart")? {
        let shop = Rc::clone(shop);
        let target = button.clone();
        dom::listen(&button, "click", move |_| {
            if let Some(item_code) = target.get_attribute("data-item_code") {
                add_clicked(&shop, &item_code);
            }
        })?;
    }
    Ok(())
}

fn add_clicked(shop: &Rc<Storefront>, item_code: &str) {
    match plan_add(&shop.page, item_code) {
        AddPlan::Direct(code) => add_to_cart(shop, &code),
        AddPlan::ChooseVariant(code) => {
            shop.send(Ok(attributes_request(&shop.api, &code)), move |shop, reply| {
                let attributes = reply.and_then(|reply| parse_attributes(&reply.body));
                match attributes {
                    Ok(attributes) => {
                        if let Some(selection) = VariantSelection::new(&code, attributes) {
                            if let Err(err) = show_picker(shop, selection) {
                                console::error("variant picker not shown", &err);
                            }
                        }
                    }
                    Err(err) => console::warn(&format!("variant attributes unavailable: {err}")),
                }
            });
        }
        AddPlan::Unknown => console::info("Product not found."),
    }
}

/// Add one unit of `item_code` and refresh the badge.
fn add_to_cart(shop: &Rc<Storefront>, item_code: &str) {
    let request = Cart::new(&shop.api, &shop.cookies).add(item_code, 1);
    shop.send(request, |shop, reply| {
        shop.settle(&added_outcome(decoded(reply)), None);
    });
}

fn element(shop: &Storefront, id: &str) -> Result<Element, JsValue> {
    shop.document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{id} missing")))
}

fn show_picker(shop: &Rc<Storefront>, selection: VariantSelection) -> Result<(), JsValue> {
    let document = &shop.document;
    let body = element(shop, "variantModalBody")?;
    let modal = element(shop, "variantModal")?;
    body.set_inner_html("");
    for attribute in selection.attributes() {
        let wrapper = document.create_element("div")?;
        wrapper.class_list().add_1("select-container")?;
        let label = document.create_element("label")?;
        label.set_text_content(Some(&attribute.attribute));
        let select = document.create_element("select")?;
        select.set_attribute("name", &attribute.attribute)?;
        for value in &attribute.values {
            let option = document.create_element("option")?;
            option.set_attribute("value", value)?;
            option.set_text_content(Some(value));
            select.append_child(&option)?;
        }
        wrapper.append_child(&label)?;
        wrapper.append_child(&select)?;
        body.append_child(&wrapper)?;
    }
    dom::set_display(&modal, "flex");

    let close_modal = modal.clone();
    dom::on_click(&element(shop, "closeModal")?, move |_| {
        dom::set_display(&close_modal, "none");
    });

    let confirm_shop = Rc::clone(shop);
    dom::on_click(&element(shop, "confirmVariantSelection")?, move |_| {
        let mut chosen = selection.clone();
        if let Ok(selects) = dom::query_within(&body, "select") {
            for select in selects {
                let Some(select) = select.dyn_ref::<HtmlSelectElement>() else {
                    continue;
                };
                if let Err(err) = chosen.choose(&select.name(), &select.value()) {
                    console::warn(&format!("variant choice ignored: {err}"));
                }
            }
        }
        confirm_shop.send(chosen.resolve_request(&confirm_shop.api), |shop, reply| {
            match reply.and_then(|reply| resolved_item(&reply.body)) {
                Ok(item_code) => add_to_cart(shop, &item_code),
                Err(err) => shop.notify(&Notice::error(cart_failure_text(&err))),
            }
        });
        dom::set_display(&modal, "none");
    });
    Ok(())
}
