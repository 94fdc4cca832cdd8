// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cancel and reorder buttons on past orders.

use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiRequest, Endpoint, RequestBuilder};
use crate::cart::CART_PATH;
use crate::outcome::{Notice, Outcome};
use crate::reply::{text_of, ApiError, Envelope};

/// Toast when the server answered without a message.
pub const NO_MESSAGE: &str = "No message returned from the server.";

/// Action on an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Cancel a submitted order.
    Cancel,
    /// Copy the order's lines into the cart.
    Reorder,
}

impl OrderAction {
    const fn endpoint(self) -> Endpoint {
        match self {
            Self::Cancel => Endpoint::CancelOrder,
            Self::Reorder => Endpoint::Reorder,
        }
    }

    /// Call the server for `order_id`.
    pub fn request(self, api: &RequestBuilder, order_id: &str) -> Result<ApiRequest, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            order_id: &'a str,
        }
        api.json(self.endpoint(), &Body { order_id })
    }

    /// Toast for the reply: the server's `message.message`, or a fallback.
    pub fn outcome(self, body: &str) -> Outcome {
        let text = Envelope::parse(body)
            .ok()
            .and_then(|env| env.payload().cloned())
            .map_or_else(|| NO_MESSAGE.to_string(), |payload| inner_message(&payload));
        let notice = Notice::success(text);
        Outcome::notice(match self {
            Self::Cancel => notice.linking_to(CART_PATH),
            Self::Reorder => notice,
        })
    }
}

fn inner_message(payload: &Value) -> String {
    payload.get("message").map(text_of).unwrap_or_default()
}
