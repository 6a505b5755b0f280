//! Response envelopes
//!
//! The HR backend answers mutations with `{"success": bool, "message": ...}`
//! and FastAPI-style failures with `{"detail": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic mutation acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    /// Read the envelope out of any JSON body. Bodies that are not objects
    /// (including an empty body) carry no verdict.
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool),
            message: server_message(value),
        }
    }

    /// True only for an explicit `"success": false`
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

/// Result of `POST /add-user-account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAccount {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
}

/// Pull a human-readable message out of a response body.
///
/// Looks at `message` first, then `detail`. A non-string `detail` (request
/// validation errors) is rendered as compact JSON.
pub fn server_message(body: &Value) -> Option<String> {
    if let Some(msg) = body.get("message").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    match body.get("detail") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_prefers_message() {
        let body = json!({"message": "Username exists", "detail": "ignored"});
        assert_eq!(server_message(&body).as_deref(), Some("Username exists"));
    }

    #[test]
    fn test_server_message_detail() {
        let body = json!({"detail": "Session expired"});
        assert_eq!(server_message(&body).as_deref(), Some("Session expired"));

        let body = json!({"detail": [{"loc": ["body", "username"], "msg": "field required"}]});
        let msg = server_message(&body).unwrap();
        assert!(msg.contains("field required"));

        assert_eq!(server_message(&json!({"ok": true})), None);
        assert_eq!(server_message(&Value::Null), None);
    }

    #[test]
    fn test_action_response_rejected() {
        let resp = ActionResponse::from_value(&json!({"success": false, "message": "nope"}));
        assert!(resp.is_rejected());
        assert_eq!(resp.message.as_deref(), Some("nope"));

        assert!(!ActionResponse::from_value(&json!({"success": true})).is_rejected());
        assert!(!ActionResponse::from_value(&Value::Null).is_rejected());
    }
}
