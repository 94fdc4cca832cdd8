// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Browser host for storefront pages.
//!
//! Thin `wasm-bindgen` adapter: it finds the markup, builds the controllers
//! from `storefront-carousel` and the behaviors from `storefront-pages`,
//! executes their effects against the DOM and sends their requests with
//! `fetch`. No page logic lives here.
//!
//! # Usage (from JavaScript)
//!
//! ```js
//! import init, { boot } from 'storefront-browser';
//!
//! document.addEventListener('DOMContentLoaded', async () => {
//!   await init();
//!   boot();
//! });
//! ```
//!
//! Tunables are read from `localStorage["storefront.settings"]`; see
//! [`settings::StorefrontSettings`]. Log output from every storefront crate
//! goes to the browser console.

use wasm_bindgen::prelude::*;

mod console;
mod cookies;
mod dom;
mod fetch;
mod mount;
pub mod notices;
pub mod settings;
mod slides;
mod storage;
mod timers;
mod wire;

use settings::StorefrontSettings;

#[cfg(feature = "console-panic")]
#[wasm_bindgen(start)]
/// Initialize console panic hook for better error messages in browser.
pub fn init_console_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Wire every storefront widget present on the current page.
///
/// Missing markup leaves the matching widget inert; a widget that fails to
/// wire is logged and skipped. Only a missing `window`/`document` is an
/// error.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    console::install_tracing();
    let settings = StorefrontSettings::load(storage::LocalStorageConfigStore::new(&window));

    wire::report(
        "rotating carousel",
        mount::mount_rotating(&window, &document, &settings.carousel),
    );
    wire::report(
        "looping carousel",
        mount::mount_looping(&window, &document, &settings.carousel),
    );

    let shop = wire::Storefront::new(window, document, settings);
    wire::wire_all(&shop);
    console::debug("storefront booted");
    Ok(())
}
