// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cart badge, cart listing and cart mutations.
//!
//! The cart lives server-side and is identified by the `cart_items` cookie,
//! which every mutation echoes back verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_app_core::cookie::CookieStore;
use tracing::debug;

use crate::api::{ApiRequest, Endpoint, RequestBuilder};
use crate::outcome::{Followup, Notice, Outcome};
use crate::page::figure;
use crate::reply::{decode_reply, ApiError, Envelope};

/// Cookie holding the cart line count.
pub const CART_COUNT_COOKIE: &str = "cart_count";
/// Cookie holding the cart total.
pub const CART_TOTAL_COOKIE: &str = "cart_total";
/// Cookie identifying the cart contents.
pub const CART_ITEMS_COOKIE: &str = "cart_items";

/// Toast after a successful add.
pub const ITEM_ADDED: &str = "Item added to cart!";
/// Toast after a successful order.
pub const ORDER_PLACED: &str = "Order placed successfully!";
/// Where the add-to-cart toast links to.
pub const CART_PATH: &str = "/cart";
/// Where a placed order lands.
pub const PROFILE_PATH: &str = "/profile";

/// Values for the header cart badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartBadge {
    /// Line count.
    pub count: String,
    /// Cart total.
    pub total: String,
}

impl CartBadge {
    /// Read the badge cookies, `"0"` when absent or empty.
    pub fn from_cookies(cookies: &impl CookieStore) -> Self {
        let read = |name| cookies.non_empty(name).unwrap_or_else(|| "0".to_string());
        Self {
            count: read(CART_COUNT_COOKIE),
            total: read(CART_TOTAL_COOKIE),
        }
    }
}

/// Direction of a quantity button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    /// Increase by `qty`.
    Add,
    /// Decrease by `qty`.
    Remove,
    /// Drop the line.
    Delete,
}

impl CartAction {
    /// Parse a `data-action` attribute.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Quantity from a `data-qty` attribute.
///
/// Leading digits (after optional whitespace and sign) are read; anything
/// unreadable or zero becomes 1.
pub fn parse_qty(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else { return 1 };
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => sign * n,
    }
}

#[derive(Serialize)]
struct AddBody<'a> {
    item_code: &'a str,
    qty: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_items: Option<String>,
}

#[derive(Serialize)]
struct QtyBody<'a> {
    item_code: &'a str,
    qty: i64,
    action: CartAction,
    cart_items: String,
}

#[derive(Serialize)]
struct OrderBody<'a> {
    doc: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_items: Option<String>,
}

/// Builds cart calls against one cookie store.
#[derive(Debug)]
pub struct Cart<'a, C: CookieStore> {
    api: &'a RequestBuilder,
    cookies: &'a C,
}

impl<'a, C: CookieStore> Cart<'a, C> {
    /// Cart bound to `api` and `cookies`.
    pub const fn new(api: &'a RequestBuilder, cookies: &'a C) -> Self {
        Self { api, cookies }
    }

    fn items_or_empty(&self) -> String {
        self.cookies
            .non_empty(CART_ITEMS_COOKIE)
            .unwrap_or_else(|| "[]".to_string())
    }

    /// Add `qty` of `item_code`.
    pub fn add(&self, item_code: &str, qty: i64) -> Result<ApiRequest, ApiError> {
        self.api.json(
            Endpoint::UpdateCart,
            &AddBody {
                item_code,
                qty,
                cart_items: self.cookies.cookie(CART_ITEMS_COOKIE),
            },
        )
    }

    /// Change the quantity of a line.
    pub fn update_qty(
        &self,
        item_code: &str,
        qty: i64,
        action: CartAction,
    ) -> Result<ApiRequest, ApiError> {
        self.api.json(
            Endpoint::UpdateCartQty,
            &QtyBody {
                item_code,
                qty,
                action,
                cart_items: self.items_or_empty(),
            },
        )
    }

    /// Fetch the cart listing.
    pub fn listing(&self) -> ApiRequest {
        self.api.query(
            Endpoint::GetCartItems,
            &[(CART_ITEMS_COOKIE, &self.items_or_empty())],
        )
    }

    /// Place the order with the checkout form fields.
    pub fn place_order(&self, form: &BTreeMap<String, String>) -> Result<ApiRequest, ApiError> {
        self.api.json(
            Endpoint::PlaceOrder,
            &OrderBody {
                doc: form,
                cart_items: self.cookies.cookie(CART_ITEMS_COOKIE),
            },
        )
    }
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartLine {
    /// Item code.
    pub item_code: String,
    /// Display name.
    #[serde(default)]
    pub item_name: String,
    /// Quantity as shown.
    #[serde(default, deserialize_with = "figure")]
    pub qty: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Line amount.
    #[serde(default, deserialize_with = "figure")]
    pub amount: String,
    /// Unit rate.
    #[serde(default, deserialize_with = "figure")]
    pub rate: String,
}

/// One tax row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxRow {
    /// Tax description.
    #[serde(default)]
    pub description: String,
    /// Tax amount as shown.
    #[serde(default, deserialize_with = "figure")]
    pub tax_amount: String,
    /// `1` when the tax is already in the item price.
    #[serde(default)]
    pub included_in_price: i64,
}

impl TaxRow {
    /// Row label, suffixed `(Inc)` for included taxes.
    pub fn label(&self) -> String {
        if self.included_in_price == 1 {
            format!("{}(Inc)", self.description)
        } else {
            self.description.clone()
        }
    }
}

/// Totals shown under the cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderDetails {
    /// Subtotal.
    #[serde(default, deserialize_with = "figure")]
    pub total_price: String,
    /// Total including taxes.
    #[serde(default, deserialize_with = "figure")]
    pub grand_total: String,
    /// Tax rows.
    #[serde(default)]
    pub order_summary: Vec<TaxRow>,
}

/// Decoded cart listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartListing {
    /// Lines in cart order.
    pub lines: Vec<CartLine>,
    /// Totals, when the server computed them.
    pub details: Option<OrderDetails>,
}

impl CartListing {
    /// Decode the listing payload: `[lines, details]` or a bare line list.
    pub fn from_message(message: Value) -> Result<Self, ApiError> {
        let Value::Array(mut parts) = message else {
            return Err(ApiError::Missing("cart lines"));
        };
        let looks_paired = parts.len() == 2
            && parts[0].is_array()
            && (parts[1].is_object() || parts[1].is_null());
        if !looks_paired {
            let lines = serde_json::from_value(Value::Array(parts))?;
            return Ok(Self {
                lines,
                details: None,
            });
        }
        let details = parts.pop().unwrap_or(Value::Null);
        let lines = parts.pop().unwrap_or(Value::Null);
        Ok(Self {
            lines: serde_json::from_value(lines)?,
            details: serde_json::from_value(details)?,
        })
    }

    /// Decode a full listing reply.
    pub fn from_reply(status: u16, body: &str) -> Result<Self, ApiError> {
        Self::from_message(decode_reply(status, body)?)
    }

    /// True when the cart should show its empty state.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Toast text for a failed cart call.
pub fn cart_failure_text(err: &ApiError) -> String {
    let message = err.user_message();
    let reason = if message.is_empty() {
        "Unknown error"
    } else {
        message.as_str()
    };
    format!("Error adding item: {reason}")
}

/// What to do after an add-to-cart reply.
pub fn added_outcome(result: Result<Value, ApiError>) -> Outcome {
    match result {
        Ok(_) => Outcome::notice(Notice::success(ITEM_ADDED).linking_to(CART_PATH))
            .then(Followup::RefreshCartCount),
        Err(err) => Outcome::notice(Notice::error(cart_failure_text(&err))),
    }
}

/// What to do after a quantity change reply.
pub fn qty_outcome(result: Result<Value, ApiError>) -> Outcome {
    match result {
        Ok(_) => Outcome {
            notice: None,
            followup: Followup::Reload,
        },
        Err(err) => Outcome::notice(Notice::error(cart_failure_text(&err))),
    }
}

/// What to do after a place-order reply.
pub fn order_outcome(body: &str) -> Outcome {
    let envelope = match Envelope::parse(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(%err, "unreadable order reply");
            return Outcome::notice(Notice::error(crate::reply::SOMETHING_WENT_WRONG));
        }
    };
    if envelope.payload().is_some() {
        return Outcome::notice(Notice::success(ORDER_PLACED)).then(Followup::Navigate {
            href: PROFILE_PATH.to_string(),
            delay_ms: 0,
        });
    }
    let text = envelope
        .server_text()
        .unwrap_or_else(|| crate::reply::SOMETHING_WENT_WRONG.to_string());
    Outcome::notice(Notice::error(text))
}
