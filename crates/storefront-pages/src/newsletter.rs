// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Newsletter sign-up form.

use std::collections::BTreeMap;

use crate::api::{ApiRequest, Endpoint, RequestBuilder};
use crate::outcome::{Notice, Outcome};
use crate::reply::{ApiError, Envelope};

/// Toast on success.
pub const SUBSCRIBED: &str = "Subscribed successfully!";
/// Toast when the server gave no usable reason.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Post the form fields as-is.
pub fn subscribe_request(
    api: &RequestBuilder,
    form: &BTreeMap<String, String>,
) -> Result<ApiRequest, ApiError> {
    api.json(Endpoint::NewsletterSubscribe, form)
}

/// Toast for the reply.
pub fn subscribe_outcome(body: &str) -> Outcome {
    let Ok(envelope) = Envelope::parse(body) else {
        return Outcome::notice(Notice::error(GENERIC_FAILURE));
    };
    if envelope.payload().is_some() {
        return Outcome::notice(Notice::success(SUBSCRIBED));
    }
    let text = envelope
        .server_text()
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    Outcome::notice(Notice::error(text))
}
