//! PIN verification
//!
//! The console asks for a PIN before every mutating action. Policy (attempt
//! limits, lockout) lives entirely on the server; the client only forwards
//! the trimmed PIN and reports the verdict.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use shared::client::PinVerifyRequest;
use tracing::{debug, warn};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Confirmation gate in front of mutating actions
#[async_trait]
pub trait PinVerifier: Send + Sync {
    /// `Ok(false)` means the PIN was checked and refused.
    async fn verify(&self, pin: &str) -> ClientResult<bool>;
}

/// Verifies against `POST system/pin-verify` for a fixed operator
pub struct HttpPinVerifier {
    http: Arc<dyn HttpClient>,
    operator: String,
}

impl std::fmt::Debug for HttpPinVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPinVerifier")
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}

impl HttpPinVerifier {
    pub fn new(http: Arc<dyn HttpClient>, operator: impl Into<String>) -> Self {
        Self {
            http,
            operator: operator.into(),
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }
}

#[async_trait]
impl PinVerifier for HttpPinVerifier {
    async fn verify(&self, pin: &str) -> ClientResult<bool> {
        let request = PinVerifyRequest {
            user_id: None,
            username: Some(self.operator.clone()),
            pin: pin.trim().to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        match self.http.post_json("system/pin-verify", body).await {
            Ok(resp) => {
                let ok = resp.get("success").and_then(Value::as_bool).unwrap_or(false);
                debug!(operator = %self.operator, ok, "PIN checked");
                Ok(ok)
            }
            Err(ClientError::Rejected { message }) => {
                debug!(operator = %self.operator, %message, "PIN refused");
                Ok(false)
            }
            Err(ClientError::Http { status, message })
                if matches!(
                    status,
                    StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND
                ) =>
            {
                warn!(operator = %self.operator, status = status.as_u16(), message = ?message, "PIN refused");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockResponse, RecordingHttpClient};
    use crate::RequestBody;
    use http::Method;
    use serde_json::json;

    fn verifier(mock: &Arc<RecordingHttpClient>) -> HttpPinVerifier {
        HttpPinVerifier::new(mock.clone(), "admin")
    }

    #[tokio::test]
    async fn test_verify_trims_and_accepts() {
        let mock = Arc::new(RecordingHttpClient::new());
        mock.on(Method::POST, "system/pin-verify", MockResponse::Json(json!({"success": true})));

        assert!(verifier(&mock).verify("  123456 ").await.unwrap());

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"username": "admin", "pin": "123456"}))
        );
    }

    #[tokio::test]
    async fn test_verify_wrong_pin_is_false() {
        let mock = Arc::new(RecordingHttpClient::new());
        mock.on(
            Method::POST,
            "system/pin-verify",
            MockResponse::Status(StatusCode::UNAUTHORIZED, Some("Invalid PIN".into())),
        );
        assert!(!verifier(&mock).verify("000000").await.unwrap());

        mock.on(Method::POST, "system/pin-verify", MockResponse::Rejected("Invalid PIN".into()));
        assert!(!verifier(&mock).verify("000000").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_server_error_propagates() {
        let mock = Arc::new(RecordingHttpClient::new());
        mock.on(
            Method::POST,
            "system/pin-verify",
            MockResponse::Status(StatusCode::INTERNAL_SERVER_ERROR, None),
        );
        let err = verifier(&mock).verify("1").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
