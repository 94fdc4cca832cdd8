// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Variant selection for template items.
//!
//! Adding a template item to the cart is a three step exchange: fetch its
//! attributes, let the shopper pick one value per attribute, then ask the
//! server which variant item that combination is. The resolved item code is
//! what gets added.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::api::{ApiRequest, Endpoint, RequestBuilder};
use crate::page::PageData;
use crate::reply::{ApiError, Envelope};

/// One attribute and its allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    /// Attribute name, e.g. `Size`.
    pub attribute: String,
    /// Values in display order.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Rejected selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No such attribute on this item.
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),
    /// The attribute exists but does not offer that value.
    #[error("{attribute:?} has no value {value:?}")]
    UnknownValue {
        /// Attribute name.
        attribute: String,
        /// Offending value.
        value: String,
    },
}

/// How an add-to-cart click proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddPlan {
    /// Plain item: add it directly with qty 1.
    Direct(String),
    /// Template item: fetch attributes first.
    ChooseVariant(String),
    /// The code is not on this page.
    Unknown,
}

/// Decide how to add `item_code` given the page's product list.
pub fn plan_add(page: &PageData, item_code: &str) -> AddPlan {
    match page.find(item_code) {
        Some(product) if product.is_template() => AddPlan::ChooseVariant(item_code.to_string()),
        Some(_) => AddPlan::Direct(item_code.to_string()),
        None => {
            warn!(item_code, "product not found");
            AddPlan::Unknown
        }
    }
}

/// Request the attributes of a template item.
pub fn attributes_request(api: &RequestBuilder, item_code: &str) -> ApiRequest {
    api.query(Endpoint::VariantAttributes, &[("item_code", item_code)])
}

/// Decode the attribute list from a reply body. An absent or empty list is
/// `Ok(vec![])`.
pub fn parse_attributes(body: &str) -> Result<Vec<VariantAttribute>, ApiError> {
    match Envelope::parse(body)?.message {
        Some(Value::Array(items)) => Ok(serde_json::from_value(Value::Array(items))?),
        _ => Ok(Vec::new()),
    }
}

/// The shopper's choice, one value per attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    item_code: String,
    attributes: Vec<VariantAttribute>,
    chosen: BTreeMap<String, String>,
}

impl VariantSelection {
    /// Start a selection with every attribute on its first value.
    ///
    /// Returns `None` when there is nothing to choose.
    pub fn new(item_code: &str, attributes: Vec<VariantAttribute>) -> Option<Self> {
        if attributes.is_empty() {
            return None;
        }
        let chosen = attributes
            .iter()
            .map(|a| {
                (
                    a.attribute.clone(),
                    a.values.first().cloned().unwrap_or_default(),
                )
            })
            .collect();
        Some(Self {
            item_code: item_code.to_string(),
            attributes,
            chosen,
        })
    }

    /// Template item code.
    pub fn item_code(&self) -> &str {
        &self.item_code
    }

    /// Attributes in display order.
    pub fn attributes(&self) -> &[VariantAttribute] {
        &self.attributes
    }

    /// Current value of `attribute`.
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.chosen.get(attribute).map(String::as_str)
    }

    /// Pick `value` for `attribute`.
    pub fn choose(&mut self, attribute: &str, value: &str) -> Result<(), SelectionError> {
        let known = self
            .attributes
            .iter()
            .find(|a| a.attribute == attribute)
            .ok_or_else(|| SelectionError::UnknownAttribute(attribute.to_string()))?;
        if !known.values.iter().any(|v| v == value) {
            return Err(SelectionError::UnknownValue {
                attribute: attribute.to_string(),
                value: value.to_string(),
            });
        }
        self.chosen.insert(attribute.to_string(), value.to_string());
        Ok(())
    }

    /// Ask the server for the variant matching the current choice.
    pub fn resolve_request(&self, api: &RequestBuilder) -> Result<ApiRequest, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            item_code: &'a str,
            selected_attributes: &'a BTreeMap<String, String>,
        }
        api.json(
            Endpoint::ResolveVariant,
            &Body {
                item_code: &self.item_code,
                selected_attributes: &self.chosen,
            },
        )
    }
}

/// Item code the server resolved the selection to.
pub fn resolved_item(body: &str) -> Result<String, ApiError> {
    match Envelope::parse(body)?.message {
        Some(Value::String(code)) if !code.is_empty() => Ok(code),
        _ => Err(ApiError::Missing("variant item code")),
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Vec<VariantAttribute> {
        vec![
            VariantAttribute {
                attribute: "Size".into(),
                values: vec!["S".into(), "M".into()],
            },
            VariantAttribute {
                attribute: "Colour".into(),
                values: vec!["Red".into()],
            },
        ]
    }

    #[test]
    fn empty_attribute_list_means_nothing_to_choose() {
        assert!(VariantSelection::new("TEE", vec![]).is_none());
        assert!(parse_attributes(r#"{"message": []}"#).unwrap().is_empty());
        assert!(parse_attributes(r#"{"message": null}"#).unwrap().is_empty());
    }

    #[test]
    fn defaults_to_first_values() {
        let sel = VariantSelection::new("TEE", attrs()).unwrap();
        assert_eq!(sel.value("Size"), Some("S"));
        assert_eq!(sel.value("Colour"), Some("Red"));
    }

    #[test]
    fn valueless_attribute_sends_empty_string() {
        let sel = VariantSelection::new(
            "TEE",
            vec![VariantAttribute {
                attribute: "Fit".into(),
                values: vec![],
            }],
        )
        .unwrap();
        assert_eq!(sel.value("Fit"), Some(""));
    }

    #[test]
    fn choose_validates() {
        let mut sel = VariantSelection::new("TEE", attrs()).unwrap();
        sel.choose("Size", "M").unwrap();
        assert_eq!(sel.value("Size"), Some("M"));
        assert_eq!(
            sel.choose("Weight", "1kg").unwrap_err(),
            SelectionError::UnknownAttribute("Weight".into())
        );
        assert!(matches!(
            sel.choose("Size", "XL").unwrap_err(),
            SelectionError::UnknownValue { .. }
        ));
        assert_eq!(sel.value("Size"), Some("M"));
    }

    #[test]
    fn resolve_posts_selection() {
        let mut sel = VariantSelection::new("TEE", attrs()).unwrap();
        sel.choose("Size", "M").unwrap();
        let req = sel.resolve_request(&RequestBuilder::new("t")).unwrap();
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"item_code": "TEE", "selected_attributes": {"Colour": "Red", "Size": "M"}})
        );
    }

    #[test]
    fn resolved_code_is_required() {
        assert_eq!(resolved_item(r#"{"message": "TEE-M-RED"}"#).unwrap(), "TEE-M-RED");
        assert!(resolved_item(r#"{"message": null}"#).is_err());
    }

    #[test]
    fn attributes_request_encodes_item_code() {
        let req = attributes_request(&RequestBuilder::new("t"), "TEE 01");
        assert!(req.url.ends_with("get_attributes_and_values?item_code=TEE%2001"));
    }
}
