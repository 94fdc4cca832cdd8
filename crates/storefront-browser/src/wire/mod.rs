// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Page wiring: markup events in, requests out, outcomes rendered.
//!
//! Every handler follows the same shape. It reads its input from the markup,
//! asks `storefront-pages` for an [`ApiRequest`], sends it, and feeds the
//! reply back to `storefront-pages` for an [`Outcome`] that [`Storefront::settle`]
//! renders.

mod account;
mod cart;
mod catalog;
mod chrome;
mod search;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use storefront_pages::api::{ApiRequest, RequestBuilder};
use storefront_pages::reply::{decode_reply, ApiError};
use storefront_pages::{Followup, Notice, Outcome, PageData};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::console;
use crate::cookies::DocumentCookies;
use crate::dom;
use crate::fetch::{self, Reply};
use crate::notices::{Notices, ToastifyPort};
use crate::settings::StorefrontSettings;

/// Everything the handlers share.
pub(crate) struct Storefront {
    window: Window,
    document: Document,
    api: RequestBuilder,
    cookies: DocumentCookies,
    page: PageData,
    settings: StorefrontSettings,
    notices: RefCell<Notices<ToastifyPort>>,
}

fn read_page_data(window: &Window) -> PageData {
    let Some(raw) = dom::global(window, &["page_data"]) else {
        return PageData::default();
    };
    let json = js_sys::JSON::stringify(&raw)
        .ok()
        .and_then(|text| text.as_string());
    match json.as_deref().map(PageData::from_json) {
        Some(Ok(page)) => page,
        Some(Err(err)) => {
            console::warn(&format!("page_data unreadable: {err}"));
            PageData::default()
        }
        None => PageData::default(),
    }
}

impl Storefront {
    pub(crate) fn new(window: Window, document: Document, settings: StorefrontSettings) -> Rc<Self> {
        let csrf_token = dom::global(&window, &["frappe", "csrf_token"])
            .and_then(|token| token.as_string())
            .unwrap_or_default();
        let notices = Notices::new(
            settings.toast,
            ToastifyPort::new(window.clone(), &settings.toast),
        );
        Rc::new(Self {
            api: RequestBuilder::new(csrf_token),
            cookies: DocumentCookies::new(&document),
            page: read_page_data(&window),
            notices: RefCell::new(notices),
            settings,
            window,
            document,
        })
    }

    /// Send `request` and run `on_reply` with the raw reply. A request that
    /// could not even be built is logged and dropped.
    pub(crate) fn send<F>(self: &Rc<Self>, request: Result<ApiRequest, ApiError>, on_reply: F)
    where
        F: FnOnce(&Rc<Self>, Result<Reply, ApiError>) + 'static,
    {
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                console::warn(&format!("request not sent: {err}"));
                return;
            }
        };
        let shop = Rc::clone(self);
        fetch::send(&self.window, &request, move |reply| on_reply(&shop, reply));
    }

    pub(crate) fn notify(&self, notice: &Notice) {
        match self.notices.try_borrow_mut() {
            Ok(mut notices) => {
                notices.post(notice);
            }
            Err(_) => console::info(&notice.text),
        }
    }

    /// Render `outcome`. `origin` is the element whose click started the call.
    pub(crate) fn settle(&self, outcome: &Outcome, origin: Option<&Element>) {
        if let Some(notice) = &outcome.notice {
            self.notify(notice);
        }
        match &outcome.followup {
            Followup::Stay => {}
            Followup::Navigate { href, delay_ms: 0 } => self.navigate(href),
            Followup::Navigate { href, delay_ms } => self.navigate_later(href.clone(), *delay_ms),
            Followup::Reload => {
                if let Err(err) = self.window.location().reload() {
                    console::error("reload failed", &err);
                }
            }
            Followup::RemoveSection => {
                if let Some(section) = origin.and_then(|el| el.closest("section").ok().flatten()) {
                    section.remove();
                }
            }
            Followup::RefreshCartCount => self.refresh_cart_badge(),
        }
    }

    pub(crate) fn navigate(&self, href: &str) {
        if let Err(err) = self.window.location().set_href(href) {
            console::error(&format!("cannot navigate to {href}"), &err);
        }
    }

    fn navigate_later(&self, href: String, delay_ms: u32) {
        let window = self.window.clone();
        let go = Closure::once_into_js(move || {
            if let Err(err) = window.location().set_href(&href) {
                console::error(&format!("cannot navigate to {href}"), &err);
            }
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(go.unchecked_ref(), delay)
        {
            console::error("setTimeout failed", &err);
        }
    }

    /// Copy the cart cookies into the header badge.
    pub(crate) fn refresh_cart_badge(&self) {
        let badge = storefront_pages::cart::CartBadge::from_cookies(&self.cookies);
        if let Some(count) = self.document.get_element_by_id("cart_count") {
            count.set_text_content(Some(&badge.count));
        }
        if let Some(total) = self.document.get_element_by_id("cart_total") {
            total.set_text_content(Some(&badge.total));
        }
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }
}

/// Body of a reply as a decoded success payload.
pub(crate) fn decoded(reply: Result<Reply, ApiError>) -> Result<Value, ApiError> {
    reply.and_then(|reply| decode_reply(reply.status, &reply.body))
}

/// Log a failed wiring step and carry on with the rest of the page.
pub(crate) fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::error(&format!("{what} not wired"), &err);
    }
}

/// Wire every storefront behavior present in the markup.
pub(crate) fn wire_all(shop: &Rc<Storefront>) {
    shop.refresh_cart_badge();
    report("cart page", cart::wire(shop));
    report("search", search::wire(shop));
    report("add to cart", catalog::wire(shop));
    report("orders", account::wire_orders(shop));
    report("addresses", account::wire_addresses(shop));
    report("dropdowns", chrome::wire_dropdowns(shop));
    report("categories", chrome::wire_categories(shop));
    report("pagination", chrome::wire_pagination(shop));
    report("newsletter", chrome::wire_newsletter(shop));
}
