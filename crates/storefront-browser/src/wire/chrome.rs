// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Site chrome: header dropdowns, category lists, pager buttons and the
//! newsletter form.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use storefront_pages::category::{CategoryPanel, CategoryState};
use storefront_pages::newsletter::{subscribe_outcome, subscribe_request, GENERIC_FAILURE};
use storefront_pages::pagination::{page_href, Pager};
use storefront_pages::{Notice, Outcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, MouseEvent, Node};

use super::Storefront;
use crate::console;
use crate::dom;

const DROPDOWN_STYLE: [(&str, &str); 8] = [
    ("position", "absolute"),
    ("width", "auto"),
    ("z-index", "1000"),
    ("box-shadow", "0px 4px 8px rgba(0, 0, 0, 0.2)"),
    ("border-radius", "0px"),
    ("padding", "20px"),
    ("display", "flex"),
    ("flex-direction", "column"),
];

fn position_dropdown(shop: &Storefront, button: &Element, list: &Element) {
    let rect = button.get_bounding_client_rect();
    let scroll_x = shop.window.scroll_x().unwrap_or_default();
    let scroll_y = shop.window.scroll_y().unwrap_or_default();
    dom::set_style(list, "top", &format!("{}px", rect.bottom() + scroll_y));
    dom::set_style(list, "left", &format!("{}px", rect.left() + scroll_x));
    for (property, value) in DROPDOWN_STYLE {
        dom::set_style(list, property, value);
    }
}

pub(super) fn wire_dropdowns(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    for button in dom::query_all(&shop.document, ".dropdown-btn")? {
        let Some(list) = button.next_element_sibling() else {
            continue;
        };
        {
            let shop = Rc::clone(shop);
            let (target, list) = (button.clone(), list.clone());
            dom::listen(&button, "mouseover", move |_| {
                position_dropdown(&shop, &target, &list);
            })?;
        }
        {
            let list = list.clone();
            dom::listen(&button, "mouseleave", move |event: Event| {
                let entering = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(MouseEvent::related_target)
                    .and_then(|t| t.dyn_into::<Node>().ok());
                if !list.contains(entering.as_ref()) {
                    dom::set_display(&list, "none");
                }
            })?;
        }
        for (kind, display) in [("mouseleave", "none"), ("mouseover", "flex")] {
            let target = list.clone();
            dom::listen(&list, kind, move |_| dom::set_display(&target, display))?;
        }
    }
    Ok(())
}

type Panels = Rc<RefCell<BTreeMap<String, CategoryPanel>>>;

fn set_category(shop: &Storefront, panels: &Panels, button: &Element, target: CategoryState) {
    let Some(category_id) = button.get_attribute("data-category_id") else {
        return;
    };
    let list = shop.document.get_element_by_id(&category_id);
    let sibling_class = match target {
        CategoryState::Collapsed => ".extend-btn",
        CategoryState::Expanded => ".collapse-btn",
    };
    let sibling = button
        .parent_element()
        .and_then(|parent| parent.query_selector(sibling_class).ok().flatten());
    let Ok(mut panels) = panels.try_borrow_mut() else {
        return;
    };
    let display = panels.entry(category_id).or_default().set(
        target,
        list.is_some(),
        sibling.is_some(),
    );
    let (Some(display), Some(list)) = (display, list) else {
        return;
    };
    dom::set_display(&list, display.list.as_css());
    if let (Some(buttons), Some(sibling)) = (display.buttons, sibling) {
        let (collapse, extend) = match target {
            CategoryState::Collapsed => (button, &sibling),
            CategoryState::Expanded => (&sibling, button),
        };
        dom::set_display(collapse, buttons.collapse.as_css());
        dom::set_display(extend, buttons.extend.as_css());
    }
}

pub(super) fn wire_categories(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let panels: Panels = Rc::default();
    for (selector, target) in [
        (".collapse-btn", CategoryState::Collapsed),
        (".extend-btn", CategoryState::Expanded),
    ] {
        for button in dom::query_all(&shop.document, selector)? {
            let shop = Rc::clone(shop);
            let panels = Rc::clone(&panels);
            let origin = button.clone();
            dom::listen(&button, "click", move |_| {
                set_category(&shop, &panels, &origin, target);
            })?;
        }
    }
    Ok(())
}

pub(super) fn wire_pagination(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let pager = match Pager::new(shop.page.page, shop.page.limit, shop.page.total_products) {
        Ok(pager) => pager,
        Err(err) => {
            console::debug(&format!("pagination inert: {err}"));
            return Ok(());
        }
    };
    let steps: [(&str, fn(&Pager) -> Option<u32>); 2] = [
        ("previous_button", Pager::previous),
        ("next_button", Pager::next),
    ];
    for (id, step) in steps {
        let Some(button) = shop.document.get_element_by_id(id) else {
            continue;
        };
        let shop = Rc::clone(shop);
        dom::listen(&button, "click", move |_| {
            console::debug(&format!("{id} clicked"));
            let Some(page) = step(&pager) else {
                return;
            };
            let current = shop.window.location().href().unwrap_or_default();
            match page_href(&current, page) {
                Ok(href) => shop.navigate(&href),
                Err(err) => console::warn(&format!("cannot page from {current}: {err}")),
            }
        })?;
    }
    Ok(())
}

pub(super) fn wire_newsletter(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let Some(form) = shop
        .document
        .get_element_by_id("newsletter_subscribe")
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let handler_shop = Rc::clone(shop);
    let handler_form = form.clone();
    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        let fields = match dom::form_fields(&handler_form) {
            Ok(fields) => fields,
            Err(err) => {
                console::error("newsletter form unreadable", &err);
                return;
            }
        };
        let request = subscribe_request(&handler_shop.api, &fields);
        handler_shop.send(request, |shop, reply| {
            let outcome = match reply {
                Ok(reply) => subscribe_outcome(&reply.body),
                Err(err) => {
                    console::warn(&format!("subscribe failed: {err}"));
                    Outcome::notice(Notice::error(GENERIC_FAILURE))
                }
            };
            shop.settle(&outcome, None);
        });
    })
}
