// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Search-as-you-type panel under the header search box.
//!
//! The panel's initial markup is one result card used as the template for
//! every hit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use storefront_app_core::timer::TimerId;
use storefront_pages::search::{price_label, ProductIndex, SearchBox, SearchOutcome, SearchStep};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

use super::Storefront;
use crate::console;
use crate::dom;
use crate::timers::{BrowserTimers, FireSink};

struct SearchPanel {
    window: Window,
    document: Document,
    input: HtmlInputElement,
    panel: Element,
    template: String,
    index: ProductIndex,
    search: RefCell<SearchBox>,
    timers: RefCell<BrowserTimers>,
}

impl SearchPanel {
    fn on_input(&self) {
        self.position();
        let step = match self.search.try_borrow_mut() {
            Ok(mut search) => search.input(&self.input.value()),
            Err(_) => return,
        };
        match step {
            SearchStep::Now(term) => self.render(&term),
            SearchStep::Deferred {
                cancel,
                schedule,
                delay_ms,
            } => {
                if let Ok(mut timers) = self.timers.try_borrow_mut() {
                    if let Some(stale) = cancel {
                        timers.clear(stale);
                    }
                    timers.set(schedule, delay_ms);
                }
            }
        }
    }

    fn fire(&self, timer: TimerId) {
        if let Ok(mut timers) = self.timers.try_borrow_mut() {
            timers.forget(timer);
        }
        let term = match self.search.try_borrow_mut() {
            Ok(mut search) => search.fire(timer),
            Err(_) => None,
        };
        if let Some(term) = term {
            self.render(&term);
        }
    }

    fn position(&self) {
        let rect = self.input.get_bounding_client_rect();
        let scroll_x = self.window.scroll_x().unwrap_or_default();
        let scroll_y = self.window.scroll_y().unwrap_or_default();
        dom::set_style(&self.panel, "position", "absolute");
        dom::set_style(&self.panel, "top", &format!("{}px", rect.bottom() + scroll_y));
        dom::set_style(&self.panel, "left", &format!("{}px", rect.left() + scroll_x));
        dom::set_style(&self.panel, "width", &format!("{}px", rect.width()));
        dom::set_style(&self.panel, "z-index", "1000");
        dom::set_display(&self.panel, "block");
    }

    fn render(&self, term: &str) {
        self.panel.set_inner_html("");
        match self.index.query(term) {
            SearchOutcome::Hidden => dom::set_display(&self.panel, "none"),
            SearchOutcome::Results(hits) => {
                for product in hits {
                    if let Err(err) = self.render_hit(product) {
                        console::error("search hit not rendered", &err);
                    }
                }
            }
        }
    }

    fn render_hit(&self, product: &storefront_pages::Product) -> Result<(), JsValue> {
        let card = self.document.create_element("div")?;
        card.set_inner_html(&self.template);
        dom::set_text_in(&card, ".product_name p", &product.item_name);
        dom::set_text_in(&card, ".product_price p", &price_label(product));
        if let (Some(image), Some(src)) = (card.query_selector(".product_image")?, &product.image) {
            image.set_attribute("src", src)?;
        }
        self.panel.append_child(&card)?;
        Ok(())
    }
}

pub(super) fn wire(shop: &Rc<Storefront>) -> Result<(), JsValue> {
    let document = &shop.document;
    let Some(panel) = document.get_element_by_id("product_search") else {
        return Ok(());
    };
    dom::set_display(&panel, "none");
    let Some(input) = document
        .get_element_by_id("search-input")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };
    let template = panel.inner_html();
    panel.set_inner_html("");

    let config = shop.settings.search;
    let search = Rc::new_cyclic(|weak: &Weak<SearchPanel>| {
        let weak = weak.clone();
        let fire: FireSink = Rc::new(move |timer| {
            if let Some(search) = weak.upgrade() {
                search.fire(timer);
            }
        });
        SearchPanel {
            window: shop.window.clone(),
            document: document.clone(),
            input: input.clone(),
            panel,
            template,
            index: ProductIndex::new(shop.page.products.clone(), &config),
            search: RefCell::new(SearchBox::new(&config)),
            timers: RefCell::new(BrowserTimers::new(shop.window.clone(), fire)),
        }
    });
    dom::listen(&input, "input", move |_| search.on_input())
}
