// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Server reply envelopes.
//!
//! Successful calls answer `{"message": ...}`. Failures carry `exc` and/or
//! `_server_messages`, the latter a JSON array whose entries are themselves
//! JSON-encoded objects with a `message` field.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallback text when a failed reply names no reason.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// Failures talking to the server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx status.
    #[error("http {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Reply `message`, or a generic fallback.
        message: String,
    },
    /// Body was not the JSON we expected.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    /// Server reported a failure in a 2xx reply (or via `_server_messages`).
    #[error("server: {0}")]
    Server(String),
    /// A required reply field was absent or empty.
    #[error("missing field: {0}")]
    Missing(&'static str),
    /// The request never produced a reply.
    #[error("transport: {0}")]
    Transport(String),
}

impl ApiError {
    /// Text suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } | Self::Server(message) => message.clone(),
            Self::Transport(message) => message.clone(),
            Self::Decode(_) | Self::Missing(_) => String::new(),
        }
    }
}

/// Raw reply envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// Payload of a successful call.
    #[serde(default)]
    pub message: Option<Value>,
    /// Server exception text.
    #[serde(default)]
    pub exc: Option<String>,
    /// Doubly encoded message list.
    #[serde(default, rename = "_server_messages")]
    pub server_messages: Option<String>,
}

impl Envelope {
    /// Parse a reply body.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decoded `_server_messages`, joined with single spaces.
    pub fn server_text(&self) -> Option<String> {
        let raw = self.server_messages.as_deref()?;
        let joined = decode_server_messages(raw).ok()?.join(" ");
        (!joined.is_empty()).then_some(joined)
    }

    /// The `message` payload when it is truthy.
    pub fn payload(&self) -> Option<&Value> {
        self.message.as_ref().filter(|v| is_truthy(v))
    }
}

/// Decode a `_server_messages` string into its message texts.
///
/// Entries that are not JSON objects are kept verbatim.
pub fn decode_server_messages(raw: &str) -> Result<Vec<String>, ApiError> {
    let entries: Vec<String> = serde_json::from_str(raw)?;
    Ok(entries
        .into_iter()
        .map(|entry| match serde_json::from_str::<Value>(&entry) {
            Ok(Value::Object(map)) => map.get("message").map(text_of).unwrap_or_default(),
            _ => entry,
        })
        .collect())
}

/// Decode a reply into its truthy `message` payload.
pub fn decode_reply(status: u16, body: &str) -> Result<Value, ApiError> {
    let ok = (200..300).contains(&status);
    let envelope = match Envelope::parse(body) {
        Ok(envelope) => envelope,
        Err(_) if !ok => {
            return Err(ApiError::Http {
                status,
                message: SOMETHING_WENT_WRONG.to_string(),
            })
        }
        Err(err) => return Err(err),
    };
    if !ok {
        if let Some(text) = envelope.server_text() {
            return Err(ApiError::Server(text));
        }
        let message = envelope
            .payload()
            .map_or_else(|| SOMETHING_WENT_WRONG.to_string(), text_of);
        return Err(ApiError::Http { status, message });
    }
    if let Some(exc) = envelope.exc.as_deref() {
        return Err(ApiError::Server(
            envelope.server_text().unwrap_or_else(|| exc.to_string()),
        ));
    }
    match envelope.message {
        Some(value) if is_truthy(&value) => Ok(value),
        _ => match envelope.server_text() {
            Some(text) => Err(ApiError::Server(text)),
            None => Err(ApiError::Missing("message")),
        },
    }
}

/// Script-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display text of a JSON value: strings unquoted, the rest as JSON.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
