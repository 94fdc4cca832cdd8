// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Requests to the storefront server.
//!
//! The server owns pricing, stock and orders; this module only knows where
//! each method lives and how to address it. Sending is the host's job.

use serde::Serialize;

use crate::reply::ApiError;

/// Command name of the web-form accept method, sent both in the body and as
/// the `x-frappe-cmd` header.
pub const WEB_FORM_ACCEPT_CMD: &str = "frappe.website.doctype.web_form.web_form.accept";

/// HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Verb as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Server methods called by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Add an item to the cart.
    UpdateCart,
    /// Change the quantity of a cart line.
    UpdateCartQty,
    /// List cart lines and totals.
    GetCartItems,
    /// Turn the cart into an order.
    PlaceOrder,
    /// Cancel a submitted order.
    CancelOrder,
    /// Copy a past order into the cart.
    Reorder,
    /// Attribute names and values of a template item.
    VariantAttributes,
    /// Resolve selected attributes to a variant item code.
    ResolveVariant,
    /// Delete (or disable) a saved address.
    DeleteAddress,
    /// Subscribe an email to the newsletter.
    NewsletterSubscribe,
    /// Submit a web form (address create/update).
    WebFormAccept,
}

impl Endpoint {
    /// Path relative to the site root.
    pub const fn path(self) -> &'static str {
        match self {
            Self::UpdateCart => "/api/method/builder_ecommerce.cart.update_cart",
            Self::UpdateCartQty => "/api/method/builder_ecommerce.cart.update_cart_qty",
            Self::GetCartItems => "/api/method/builder_ecommerce.cart.get_cart_items",
            Self::PlaceOrder => "/api/method/builder_ecommerce.cart.place_order",
            Self::CancelOrder => {
                "/api/method/builder_ecommerce.ecommerce.order.order.cancel_order"
            }
            Self::Reorder => "/api/method/builder_ecommerce.ecommerce.order.order.reorder",
            Self::VariantAttributes => {
                "/api/method/builder_ecommerce.ecommerce.variant_selector.utils.get_attributes_and_values"
            }
            Self::ResolveVariant => {
                "/api/method/builder_ecommerce.ecommerce.variant_selector.utils.get_next_attribute_and_values"
            }
            Self::DeleteAddress => "/api/method/builder_ecommerce.api.address.delete_address",
            Self::NewsletterSubscribe => {
                "/api/method/frappe.email.doctype.newsletter.newsletter.subscribe"
            }
            Self::WebFormAccept => "/",
        }
    }

    /// Verb the server expects.
    pub const fn method(self) -> Method {
        match self {
            Self::GetCartItems | Self::VariantAttributes => Method::Get,
            Self::DeleteAddress => Method::Delete,
            _ => Method::Post,
        }
    }
}

/// A fully addressed request, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Verb.
    pub method: Method,
    /// Path plus query string.
    pub url: String,
    /// Header pairs in sending order.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Append a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Value of the first header called `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds requests carrying the session's CSRF token.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    csrf_token: String,
}

impl RequestBuilder {
    /// Builder for a page whose CSRF token is `csrf_token`.
    pub fn new(csrf_token: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
        }
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".into(), "application/json".into()),
            ("x-frappe-csrf-token".into(), self.csrf_token.clone()),
            ("x-requested-with".into(), "XMLHttpRequest".into()),
            (
                "Accept".into(),
                "application/json, text/javascript, */*; q=0.01".into(),
            ),
        ]
    }

    /// Request with a JSON body.
    pub fn json<T>(&self, endpoint: Endpoint, payload: &T) -> Result<ApiRequest, ApiError>
    where
        T: Serialize + ?Sized,
    {
        Ok(ApiRequest {
            method: endpoint.method(),
            url: endpoint.path().to_string(),
            headers: self.headers(),
            body: Some(serde_json::to_string(payload)?),
        })
    }

    /// Body-less request with percent-encoded query parameters.
    pub fn query(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> ApiRequest {
        let mut url = endpoint.path().to_string();
        for (i, (name, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(name));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        ApiRequest {
            method: endpoint.method(),
            url,
            headers: self.headers(),
            body: None,
        }
    }
}
