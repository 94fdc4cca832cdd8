// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved addresses on the profile page.

use std::collections::BTreeMap;

use serde::Serialize;
use storefront_app_core::cookie::CookieStore;

use crate::api::{ApiRequest, Endpoint, RequestBuilder, WEB_FORM_ACCEPT_CMD};
use crate::outcome::{Followup, Notice, Outcome};
use crate::reply::{ApiError, Envelope};

/// Web form that owns address records.
pub const ADDRESS_WEB_FORM: &str = "addresses";
/// Cookie with the signed-in customer's name.
pub const FULL_NAME_COOKIE: &str = "full_name";
/// Where the address tab lives.
pub const ADDRESS_TAB_HREF: &str = "/profile?showTab=3";
/// Delay before returning to the address tab.
pub const RETURN_DELAY_MS: u32 = 500;

/// Address kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressType {
    /// Ship-to address.
    Shipping,
    /// Bill-to address.
    Billing,
}

impl AddressType {
    /// Kind of an existing record, inferred from its name.
    pub fn of_record(record_name: &str) -> Self {
        if record_name.contains("Shipping") {
            Self::Shipping
        } else {
            Self::Billing
        }
    }

    /// Select-box value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Billing => "Billing",
        }
    }
}

/// Fields of the address form. `name` is set when editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressDraft {
    /// Existing record name; `None` creates a new address.
    pub name: Option<String>,
    /// First line.
    pub address_line1: String,
    /// Second line.
    pub address_line2: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub pincode: String,
    /// Phone.
    pub phone: String,
    /// Form value of the type select.
    pub address_type: String,
}

#[derive(Serialize)]
struct AddressDoc<'a> {
    #[serde(flatten)]
    draft: &'a AddressDraft,
    address_title: String,
    doctype: &'static str,
    web_form_name: &'static str,
}

#[derive(Serialize)]
struct WebFormBody<'a> {
    data: String,
    web_form: &'a str,
    for_payment: bool,
    cmd: &'a str,
}

impl AddressDraft {
    /// Read the draft from submitted form fields. Absent fields are empty and
    /// an empty `name` means a new record.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            name: fields.get("name").filter(|n| !n.is_empty()).cloned(),
            address_line1: field("address_line1"),
            address_line2: field("address_line2"),
            city: field("city"),
            state: field("state"),
            country: field("country"),
            pincode: field("pincode"),
            phone: field("phone"),
            address_type: field("address_type"),
        }
    }

    /// Record title derived from the customer's name cookie.
    pub fn title(cookies: &impl CookieStore) -> String {
        format!(
            "{}-Address",
            cookies.cookie(FULL_NAME_COOKIE).unwrap_or_default()
        )
    }

    /// Submit the form (create or update) through the web-form command.
    pub fn submit_request(
        &self,
        api: &RequestBuilder,
        cookies: &impl CookieStore,
    ) -> Result<ApiRequest, ApiError> {
        let doc = AddressDoc {
            draft: self,
            address_title: Self::title(cookies),
            doctype: "Address",
            web_form_name: ADDRESS_WEB_FORM,
        };
        let body = WebFormBody {
            data: serde_json::to_string(&doc)?,
            web_form: ADDRESS_WEB_FORM,
            for_payment: false,
            cmd: WEB_FORM_ACCEPT_CMD,
        };
        Ok(api
            .json(Endpoint::WebFormAccept, &body)?
            .with_header("x-frappe-cmd", WEB_FORM_ACCEPT_CMD))
    }
}

/// What to do once the form was accepted.
pub fn submitted_outcome() -> Outcome {
    Outcome::notice(Notice::success("Address Created successfully")).then(Followup::Navigate {
        href: ADDRESS_TAB_HREF.to_string(),
        delay_ms: RETURN_DELAY_MS,
    })
}

/// Question put to the shopper before deleting.
pub fn delete_prompt(record_name: &str) -> String {
    format!("Are you sure you want to delete address: {record_name}?")
}

/// Delete an address record.
pub fn delete_request(api: &RequestBuilder, record_name: &str) -> Result<ApiRequest, ApiError> {
    #[derive(Serialize)]
    struct Body<'a> {
        name: &'a str,
    }
    api.json(Endpoint::DeleteAddress, &Body { name: record_name })
}

/// What to do after a delete reply. Any 2xx status counts as deleted.
pub fn delete_outcome(status: u16, body: &str) -> Outcome {
    if (200..300).contains(&status) {
        return Outcome::notice(Notice::success("Address deleted successfully"))
            .then(Followup::RemoveSection);
    }
    let reason = Envelope::parse(body)
        .ok()
        .and_then(|env| env.payload().map(crate::reply::text_of))
        .unwrap_or_else(|| "Unknown error".to_string());
    Outcome::notice(Notice::error(format!("Failed to delete address: {reason}")))
}

/// What to do when the delete call never got a reply.
pub fn delete_transport_outcome() -> Outcome {
    Outcome::notice(Notice::error("An error occurred while deleting the address."))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use storefront_app_core::cookie::CookieJar;

    fn draft() -> AddressDraft {
        AddressDraft {
            name: None,
            address_line1: "1 Quay St".into(),
            address_line2: String::new(),
            city: "Porto".into(),
            state: "Norte".into(),
            country: "Portugal".into(),
            pincode: "4000".into(),
            phone: "555".into(),
            address_type: "Billing".into(),
        }
    }

    #[test]
    fn submit_wraps_doc_in_web_form_payload() {
        let jar = CookieJar::parse("full_name=Ana%20Silva");
        let req = draft()
            .submit_request(&RequestBuilder::new("t"), &jar)
            .unwrap();
        assert_eq!(req.url, "/");
        assert_eq!(req.header("x-frappe-cmd"), Some(WEB_FORM_ACCEPT_CMD));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["web_form"], "addresses");
        assert_eq!(body["for_payment"], false);
        assert_eq!(body["cmd"], WEB_FORM_ACCEPT_CMD);
        let doc: Value = serde_json::from_str(body["data"].as_str().unwrap()).unwrap();
        assert_eq!(doc["address_title"], "Ana Silva-Address");
        assert_eq!(doc["doctype"], "Address");
        assert_eq!(doc["web_form_name"], "addresses");
        assert_eq!(doc["city"], "Porto");
        assert_eq!(doc["name"], Value::Null);
    }

    #[test]
    fn fields_fill_draft() {
        let fields = BTreeMap::from([
            ("name".to_string(), String::new()),
            ("city".to_string(), "Porto".to_string()),
            ("address_type".to_string(), "Shipping".to_string()),
        ]);
        let draft = AddressDraft::from_fields(&fields);
        assert!(draft.name.is_none());
        assert_eq!(draft.city, "Porto");
        assert_eq!(draft.address_type, "Shipping");
        assert!(draft.pincode.is_empty());
    }

    #[test]
    fn title_without_cookie_is_bare() {
        assert_eq!(AddressDraft::title(&CookieJar::default()), "-Address");
    }

    #[test]
    fn record_name_decides_type() {
        assert_eq!(AddressType::of_record("Ana-Shipping"), AddressType::Shipping);
        assert_eq!(AddressType::of_record("Ana-Billing-1").as_str(), "Billing");
        assert_eq!(AddressType::of_record("Ana-Office"), AddressType::Billing);
    }

    #[test]
    fn delete_outcomes() {
        let ok = delete_outcome(200, "{}");
        assert_eq!(ok.followup, Followup::RemoveSection);
        let denied = delete_outcome(403, r#"{"message": "Not permitted"}"#);
        assert_eq!(
            denied.notice.unwrap().text,
            "Failed to delete address: Not permitted"
        );
        let opaque = delete_outcome(500, "oops");
        assert_eq!(
            opaque.notice.unwrap().text,
            "Failed to delete address: Unknown error"
        );
        assert_eq!(delete_prompt("A-1"), "Are you sure you want to delete address: A-1?");
    }

    #[test]
    fn submit_returns_to_address_tab() {
        assert_eq!(
            submitted_outcome().followup,
            Followup::Navigate {
                href: ADDRESS_TAB_HREF.into(),
                delay_ms: 500
            }
        );
    }
}
