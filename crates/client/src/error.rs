//! Error taxonomy and backend error payload normalization.
//!
//! The backend reports failures in several shapes: a bare array of messages,
//! an object keyed by one of a few known fields, or a plain string.
//! [`NormalizedError`] resolves the shape exactly once, so downstream code
//! never re-inspects raw payloads.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Shown when no message could be extracted from a payload.
pub const FALLBACK_ERROR_MESSAGE: &str = "an error occurred";

/// Known message-bearing fields on object payloads, in probe order.
const MESSAGE_FIELDS: [&str; 4] = ["messages", "message", "detail", "error"];

/// A backend error resolved into a flat message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    /// First extracted message, or the fallback.
    pub primary_message: String,
    /// Every extracted message, in payload order.
    pub all_messages: Vec<String>,
    /// HTTP status of the failed response, when one was received.
    pub http_status: Option<u16>,
}

impl NormalizedError {
    /// Normalize an arbitrary error payload.
    ///
    /// Total over every [`Value`]: unrecognized shapes degrade to the
    /// fallback message, never a panic.
    pub fn from_payload(http_status: Option<u16>, payload: &Value) -> Self {
        let all_messages = collect_messages(payload);
        let primary_message = all_messages
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        let all_messages = if all_messages.is_empty() {
            vec![primary_message.clone()]
        } else {
            all_messages
        };
        Self {
            primary_message,
            all_messages,
            http_status,
        }
    }

    /// Wrap an already well-formed message, bypassing payload probing.
    pub fn from_message<S: Into<String>>(message: S, http_status: Option<u16>) -> Self {
        let message = message.into();
        Self {
            primary_message: message.clone(),
            all_messages: vec![message],
            http_status,
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (http {status})", self.primary_message),
            None => f.write_str(&self.primary_message),
        }
    }
}

fn collect_messages(payload: &Value) -> Vec<String> {
    match payload {
        Value::Array(items) => items.iter().map(value_to_message).collect(),
        Value::Object(map) => {
            for field in MESSAGE_FIELDS {
                match map.get(field) {
                    // Empty-ish fields keep probing, matching the backend's
                    // habit of sending `{"message": null, "detail": "..."}`.
                    None | Some(Value::Null) => continue,
                    Some(Value::String(s)) if s.is_empty() => continue,
                    Some(Value::Array(items)) => {
                        return items.iter().map(value_to_message).collect();
                    }
                    Some(other) => return vec![value_to_message(other)],
                }
            }
            Vec::new()
        }
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn value_to_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Failure of an API operation, classified per the propagation policy:
/// validation never reaches the network, 401s that survive refresh are
/// authentication failures, 5xx is a service failure, transport errors carry
/// the underlying cause, and everything else is a plain API error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("authentication failed: {0}")]
    Authentication(NormalizedError),
    #[error("service unavailable: {0}")]
    Service(NormalizedError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(NormalizedError),
}

impl ApiError {
    /// The normalized form of this error, building one for the variants that
    /// do not already carry it.
    pub fn to_normalized(&self) -> NormalizedError {
        match self {
            ApiError::Validation(message) => NormalizedError::from_message(message.clone(), None),
            ApiError::Authentication(normalized)
            | ApiError::Service(normalized)
            | ApiError::Api(normalized) => normalized.clone(),
            ApiError::Network(err) => NormalizedError::from_message(err.to_string(), None),
        }
    }

    pub fn primary_message(&self) -> String {
        self.to_normalized().primary_message
    }
}
