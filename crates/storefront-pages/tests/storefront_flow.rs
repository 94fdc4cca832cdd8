// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used, clippy::panic)]
//! End-to-end page flows against in-memory cookies and canned replies.

use serde_json::Value;
use storefront_app_core::toast::{ToastConfig, ToastKind, ToastService};
use storefront_dry_tests::{sample_page_data, InMemoryCookieStore};
use storefront_pages::api::{Method, RequestBuilder};
use storefront_pages::cart::{added_outcome, Cart, CartBadge, CartListing};
use storefront_pages::pagination::{page_href, Pager};
use storefront_pages::reply::decode_reply;
use storefront_pages::search::{ProductIndex, SearchConfig, SearchOutcome};
use storefront_pages::variant::{
    parse_attributes, plan_add, resolved_item, AddPlan, VariantSelection,
};
use storefront_pages::Followup;

fn body(raw: Option<&str>) -> Value {
    serde_json::from_str(raw.unwrap()).unwrap()
}

#[test]
fn template_item_goes_through_variant_resolution() {
    let page = sample_page_data();
    let api = RequestBuilder::new("csrf-1");
    let cookies = InMemoryCookieStore::new().with("cart_items", "[\"MUG-01\"]");

    let AddPlan::ChooseVariant(code) = plan_add(&page, "TEE-TPL") else {
        panic!("template should need a variant");
    };
    let attrs = parse_attributes(
        r#"{"message": [{"attribute": "Size", "values": ["S", "M", "L"]},
                        {"attribute": "Colour", "values": ["Black"]}]}"#,
    )
    .unwrap();
    let mut selection = VariantSelection::new(&code, attrs).unwrap();
    selection.choose("Size", "L").unwrap();
    let resolve = selection.resolve_request(&api).unwrap();
    assert_eq!(
        body(resolve.body.as_deref())["selected_attributes"],
        serde_json::json!({"Size": "L", "Colour": "Black"})
    );

    let variant = resolved_item(r#"{"message": "TEE-L-BLK"}"#).unwrap();
    let add = Cart::new(&api, &cookies).add(&variant, 1).unwrap();
    assert_eq!(add.method, Method::Post);
    assert_eq!(
        body(add.body.as_deref()),
        serde_json::json!({"item_code": "TEE-L-BLK", "qty": 1, "cart_items": "[\"MUG-01\"]"})
    );
}

#[test]
fn plain_item_is_added_directly_and_toasted_once() {
    let page = sample_page_data();
    assert_eq!(plan_add(&page, "MUG-02"), AddPlan::Direct("MUG-02".into()));
    assert_eq!(plan_add(&page, "NOPE"), AddPlan::Unknown);

    let outcome = added_outcome(decode_reply(200, r#"{"message": {"ok": true}}"#));
    assert_eq!(outcome.followup, Followup::RefreshCartCount);
    let notice = outcome.notice.unwrap();

    let mut toasts = ToastService::new(ToastConfig::default());
    let first = toasts.push(notice.kind, notice.text.clone(), notice.destination.clone(), 1_000);
    let again = toasts.push(notice.kind, notice.text, notice.destination, 1_200);
    assert_eq!(first, again);
    let shown = toasts.latest(1_300).unwrap();
    assert_eq!(shown.kind, ToastKind::Success);
    assert_eq!(shown.destination.as_deref(), Some("/cart"));
}

#[test]
fn cart_page_reads_cookies_and_listing() {
    let cookies = InMemoryCookieStore::new()
        .with("cart_count", "2")
        .with("cart_total", "30.5");
    let badge = CartBadge::from_cookies(&cookies);
    assert_eq!((badge.count.as_str(), badge.total.as_str()), ("2", "30.5"));

    let api = RequestBuilder::new("t");
    let listing_req = Cart::new(&api, &cookies).listing();
    assert!(listing_req.url.ends_with("?cart_items=%5B%5D"));

    let listing = CartListing::from_reply(
        200,
        r#"{"message": [[{"item_code": "MUG-01", "item_name": "Coffee Mug", "qty": 2, "amount": 24, "rate": 12}], null]}"#,
    )
    .unwrap();
    assert_eq!(listing.lines.len(), 1);
    assert!(listing.details.is_none());
}

#[test]
fn search_and_pagination_use_page_data() {
    let page = sample_page_data();
    let index = ProductIndex::new(page.products.clone(), &SearchConfig::default());
    let SearchOutcome::Results(hits) = index.query("mug") else {
        panic!("expected results");
    };
    assert_eq!(hits.len(), 2);

    let pager = Pager::new(page.page, page.limit, page.total_products).unwrap();
    assert_eq!(pager.total_pages(), 3);
    let next = pager.next().unwrap();
    assert_eq!(
        page_href("https://shop.test/shop?page=2", next).unwrap(),
        "https://shop.test/shop?page=3"
    );
}
