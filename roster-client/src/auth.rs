//! Session login

use std::sync::Arc;

use shared::client::LoginResponse;
use tracing::info;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Exchanges credentials for a session token
pub struct AuthClient {
    http: Arc<dyn HttpClient>,
}

impl AuthClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// `POST auth/login` with form credentials
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = self
            .http
            .post_form(
                "auth/login",
                vec![
                    ("username".into(), username.trim().into()),
                    ("password".into(), password.into()),
                ],
            )
            .await?;
        let resp: LoginResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::InvalidResponse(format!("Missing login data: {e}")))?;
        info!(username = %resp.username, role = ?resp.role, "Logged in");
        Ok(resp)
    }
}
