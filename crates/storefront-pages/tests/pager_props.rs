// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used)]
//! Pager navigation invariants.

use proptest::prelude::*;
use storefront_pages::pagination::{page_href, Pager};

proptest! {
    #[test]
    fn navigation_stays_within_bounds(limit in 1u32..100, total in 0u32..10_000, page in 1u32..200) {
        let pager = Pager::new(page, limit, total).unwrap();
        let pages = pager.total_pages();
        prop_assert!(pages * limit >= total);
        prop_assert!(pages == 0 || (pages - 1) * limit < total);
        if let Some(prev) = pager.previous() {
            prop_assert!(prev >= 1);
            prop_assert_eq!(prev + 1, page);
        }
        if let Some(next) = pager.next() {
            prop_assert!(next <= pages);
            prop_assert_eq!(next, page + 1);
        }
    }

    #[test]
    fn href_always_carries_exactly_one_page(page in 1u32..500, old in 1u32..500) {
        let href = page_href(&format!("https://shop.test/all?page={old}&q=mug"), page).unwrap();
        let url = url::Url::parse(&href).unwrap();
        let pages: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "page")
            .map(|(_, v)| v.into_owned())
            .collect();
        prop_assert_eq!(pages, vec![page.to_string()]);
    }
}
