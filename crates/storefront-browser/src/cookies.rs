// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `document.cookie` as a [`CookieStore`].

use storefront_app_core::cookie::{CookieJar, CookieStore};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

/// Live view of the page cookies. The header is re-read on every lookup,
/// since cart calls update the cookies behind our back.
pub(crate) struct DocumentCookies {
    document: Option<HtmlDocument>,
}

impl DocumentCookies {
    pub(crate) fn new(document: &Document) -> Self {
        Self {
            document: document.clone().dyn_into::<HtmlDocument>().ok(),
        }
    }
}

impl CookieStore for DocumentCookies {
    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.document.as_ref()?.cookie().ok()?;
        CookieJar::parse(&header).cookie(name)
    }
}
