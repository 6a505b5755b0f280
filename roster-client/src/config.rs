//! Client configuration

use std::sync::Arc;

use crate::employees::EmployeeClient;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::pin::HttpPinVerifier;
use crate::{ClientError, ClientResult};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the HR backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Session token sent as `Authorization: Bearer`
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Operator whose PIN gates mutating actions
    pub operator: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            operator: None,
        }
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the operator username used for PIN checks
    pub fn with_operator(mut self, username: impl Into<String>) -> Self {
        self.operator = Some(username.into());
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::from_config(self)
    }

    /// Create an employee client backed by a fresh HTTP client
    pub fn build_employee_client(&self) -> ClientResult<EmployeeClient> {
        Ok(EmployeeClient::new(Arc::new(self.build_http_client()?)))
    }

    /// PIN verifier for the configured operator over an existing transport
    pub fn build_pin_verifier(&self, http: Arc<dyn HttpClient>) -> ClientResult<HttpPinVerifier> {
        let operator = self
            .operator
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .ok_or_else(|| ClientError::Config("operator is required for PIN checks".into()))?;
        Ok(HttpPinVerifier::new(http, operator))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PinVerifier;
    use crate::mock::{MockResponse, RecordingHttpClient};
    use crate::RequestBody;
    use http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_pin_verifier_uses_configured_operator() {
        let mock = Arc::new(RecordingHttpClient::new());
        mock.on(Method::POST, "system/pin-verify", MockResponse::Json(json!({"success": true})));

        let verifier = ClientConfig::default()
            .with_operator(" bob ")
            .build_pin_verifier(mock.clone())
            .unwrap();
        assert_eq!(verifier.operator(), "bob");
        assert!(verifier.verify("1234").await.unwrap());

        match &mock.requests()[0].body {
            RequestBody::Json(body) => assert_eq!(body["username"], "bob"),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn test_pin_verifier_requires_operator() {
        let mock = Arc::new(RecordingHttpClient::new());
        let err = ClientConfig::default().build_pin_verifier(mock.clone()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::default()
            .with_operator("  ")
            .build_pin_verifier(mock)
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
