// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Product catalogue and page data samples.

use storefront_pages::{PageData, Product};

fn product(item_code: &str, item_name: &str, standard_rate: &str, has_variants: i64) -> Product {
    Product {
        item_code: item_code.to_string(),
        item_name: item_name.to_string(),
        image: Some(format!("/files/{}.png", item_code.to_lowercase())),
        standard_rate: standard_rate.to_string(),
        has_variants,
    }
}

/// Five products; `TEE-TPL` is a template item with variants.
pub fn sample_products() -> Vec<Product> {
    vec![
        product("MUG-01", "Coffee Mug", "12", 0),
        product("MUG-02", "Travel Mug", "18.5", 0),
        product("TEE-TPL", "Logo T-Shirt", "25", 1),
        product("CAP-01", "Baseball Cap", "15", 0),
        product("BAG-01", "Canvas Tote", "9.99", 0),
    ]
}

/// Second page of a 12-per-page listing of 30 products.
pub fn sample_page_data() -> PageData {
    PageData {
        products: sample_products(),
        page: 2,
        limit: 12,
        total_products: 30,
    }
}
