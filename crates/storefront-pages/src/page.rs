// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Data the server template injects as `page_data`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::reply::text_of;

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Item code used by every cart call.
    pub item_code: String,
    /// Display name.
    #[serde(default)]
    pub item_name: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Price as shown.
    #[serde(default, deserialize_with = "figure")]
    pub standard_rate: String,
    /// `1` for template items that need a variant chosen first.
    #[serde(default)]
    pub has_variants: i64,
}

impl Product {
    /// Whether adding this product requires choosing a variant.
    pub const fn is_template(&self) -> bool {
        self.has_variants == 1
    }
}

/// Page-level data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageData {
    /// Products listed on the page.
    pub products: Vec<Product>,
    /// Current listing page, 1-based.
    pub page: u32,
    /// Products per listing page.
    pub limit: u32,
    /// Products across all listing pages.
    pub total_products: u32,
}

impl PageData {
    /// Parse the injected JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Product with `item_code`, if listed.
    pub fn find(&self, item_code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.item_code == item_code)
    }
}

/// Numbers and strings alike, rendered as display text.
pub(crate) fn figure<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rates_render_as_text() {
        let page = PageData::from_json(
            r#"{"products":[{"item_code":"T","item_name":"Tee","standard_rate":12.5,"has_variants":1}],
                "page":2,"limit":12,"total_products":30}"#,
        )
        .unwrap();
        let tee = page.find("T").unwrap();
        assert_eq!(tee.standard_rate, "12.5");
        assert!(tee.is_template());
        assert_eq!(page.page, 2);
        assert!(page.find("missing").is_none());
    }

    #[test]
    fn absent_fields_default() {
        let page = PageData::from_json("{}").unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.limit, 0);
    }
}
