//! Auth and PIN DTOs shared between the client and console

use serde::{Deserialize, Serialize};

/// `POST /auth/login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// `POST /system/pin-verify` request. One of `user_id`/`username` identifies
/// whose PIN is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinVerifyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub pin: String,
}
