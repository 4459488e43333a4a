//! API request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payment confirmation posted by the gateway.
///
/// Fields stay loosely typed: the gateway may send `amount` as a number or
/// a string, and the signature covers whatever text it used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub order_id: Option<Value>,
    pub amount: Option<Value>,
    pub sign: Option<String>,
}

/// `{"status": "..."}` body, with a message on errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: Some(message.into()),
        }
    }
}

/// Text a JSON scalar contributes to the signature: strings verbatim,
/// numbers in their JSON form. `None` for anything else.
pub fn signed_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
