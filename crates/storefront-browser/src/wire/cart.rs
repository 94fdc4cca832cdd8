// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cart and checkout pages: listing, quantity buttons, place order.

use std::rc::Rc;

use storefront_pages::cart::{
    cart_failure_text, order_outcome, parse_qty, qty_outcome, Cart, CartAction, CartLine,
    CartListing, OrderDetails, CART_PATH,
};
use storefront_pages::{Notice, Outcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement};

use super::{decoded, Storefront};
use crate::dom;

const CHECKOUT_PATH: &str = "/checkout";

pub(super) fn wire(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let path = shop.pathname();
    if path != CART_PATH && path != CHECKOUT_PATH {
        return Ok(());
    }
    wire_place_order(shop)?;
    load_listing(shop);
    Ok(())
}

fn wire_place_order(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let Some(form) = shop.document.get_element_by_id("place-order") else {
        return Ok(());
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        return Ok(());
    };
    let handler_shop = Rc::clone(shop);
    let handler_form = form.clone();
    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        let fields = match dom::form_fields(&handler_form) {
            Ok(fields) => fields,
            Err(err) => {
                crate::console::error("checkout form unreadable", &err);
                return;
            }
        };
        let request = Cart::new(&handler_shop.api, &handler_shop.cookies).place_order(&fields);
        handler_shop.send(request, |shop, reply| {
            let outcome = match reply {
                Ok(reply) => order_outcome(&reply.body),
                Err(err) => Outcome::notice(Notice::error(err.user_message())),
            };
            shop.settle(&outcome, None);
        });
    })
}

fn load_listing(shop: &Rc<Storefront>) {
    let request = Cart::new(&shop.api, &shop.cookies).listing();
    shop.send(Ok(request), |shop, reply| {
        let listing =
            reply.and_then(|reply| CartListing::from_reply(reply.status, &reply.body));
        match listing {
            Ok(listing) => {
                if let Err(err) = render_listing(shop, &listing) {
                    crate::console::error("cart listing not rendered", &err);
                }
            }
            Err(err) => shop.notify(&Notice::error(cart_failure_text(&err))),
        }
    });
}

fn render_listing(shop: &Rc<Storefront>, listing: &CartListing) -> Result<(), JsValue> {
    let document = &shop.document;
    if let Some(container) = document.query_selector("#cart-container")? {
        let template = container.inner_html();
        container.set_inner_html("");
        if listing.is_empty() {
            show_empty_cart(shop);
        } else {
            for line in &listing.lines {
                let row = render_line(shop, &template, line)?;
                container.append_child(&row)?;
            }
        }
    }
    if let Some(details) = &listing.details {
        render_details(shop, details)?;
    }
    Ok(())
}

fn show_empty_cart(shop: &Storefront) {
    let document = &shop.document;
    if let (Some(cart), Some(empty)) = (
        document.get_element_by_id("cart-section"),
        document.get_element_by_id("empty-cart"),
    ) {
        dom::set_display(&cart, "none");
        dom::set_display(&empty, "flex");
    }
    if let Some(place_order) = document.get_element_by_id("place-order") {
        dom::set_display(&place_order, "none");
    }
}

fn render_line(shop: &Rc<Storefront>, template: &str, line: &CartLine) -> Result<Element, JsValue> {
    let row = shop.document.create_element("div")?;
    row.set_inner_html(template);
    dom::set_text_in(&row, ".item_name p", &line.item_name);
    dom::set_text_in(&row, ".item_qty p", &line.qty);
    dom::set_text_in(&row, ".item_code p", &line.item_code);
    dom::set_text_in(&row, ".price p", &line.amount);
    dom::set_text_in(&row, ".rate p", &line.rate);
    if let Some(image) = row.query_selector(".item_image")? {
        image.set_attribute("src", line.image.as_deref().unwrap_or_default())?;
    }
    for button in dom::query_within(&row, ".update_cart_qty")? {
        button.set_attribute("data-item-code", &line.item_code)?;
        let shop = Rc::clone(shop);
        let item_code = line.item_code.clone();
        let target = button.clone();
        dom::on_click(&button, move |_| {
            change_qty(&shop, &item_code, &target);
        });
    }
    Ok(row)
}

fn change_qty(shop: &Rc<Storefront>, item_code: &str, button: &Element) {
    let raw_action = button.get_attribute("data-action").unwrap_or_default();
    let Some(action) = CartAction::parse(&raw_action) else {
        crate::console::warn(&format!("unknown cart action {raw_action:?}"));
        return;
    };
    let qty = parse_qty(button.get_attribute("data-qty").as_deref());
    let request = Cart::new(&shop.api, &shop.cookies).update_qty(item_code, qty, action);
    shop.send(request, |shop, reply| {
        shop.settle(&qty_outcome(decoded(reply)), None);
    });
    shop.refresh_cart_badge();
}

fn render_details(shop: &Storefront, details: &OrderDetails) -> Result<(), JsValue> {
    let document = &shop.document;
    if let Some(sub_total) = document.get_element_by_id("sub_total") {
        sub_total.set_text_content(Some(&details.total_price));
    }
    if let Some(grand_total) = document.get_element_by_id("grand_total") {
        grand_total.set_text_content(Some(&details.grand_total));
    }
    let Some(taxes) = document.get_element_by_id("tax_container") else {
        return Ok(());
    };
    let template = taxes.inner_html();
    taxes.set_inner_html("");
    for row in &details.order_summary {
        let item = document.create_element("div")?;
        item.set_inner_html(&template);
        dom::set_text_in(&item, ".tax_name p", &row.label());
        dom::set_text_in(&item, ".tax_amount p", &row.tax_amount);
        taxes.append_child(&item)?;
    }
    Ok(())
}
