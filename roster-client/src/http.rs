//! HTTP client - network transport
//!
//! Every operation in this crate goes through [`HttpClient::request`]. The
//! convenience methods only build an [`ApiRequest`].

use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::Client;
use serde_json::Value;
use shared::response::{ActionResponse, server_message};
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, ClientResult};

/// Request body variants the backend understands
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`, pairs sent in order
    Form(Vec<(String, String)>),
    /// `application/json`
    Json(Value),
}

impl RequestBody {
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value of a form field, for tests and logging
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// A single request against the backend. `path` is relative to the base URL
/// and may carry a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, RequestBody::Empty)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, RequestBody::Empty)
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and return the parsed JSON body.
    ///
    /// An empty success body is `Value::Null`.
    async fn request(&self, request: ApiRequest) -> ClientResult<Value>;

    async fn get(&self, path: &str) -> ClientResult<Value> {
        self.request(ApiRequest::get(path)).await
    }

    async fn post_form(&self, path: &str, fields: Vec<(String, String)>) -> ClientResult<Value> {
        self.request(ApiRequest::new(Method::POST, path, RequestBody::Form(fields)))
            .await
    }

    async fn put_form(&self, path: &str, fields: Vec<(String, String)>) -> ClientResult<Value> {
        self.request(ApiRequest::new(Method::PUT, path, RequestBody::Form(fields)))
            .await
    }

    async fn post_json(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(ApiRequest::new(Method::POST, path, RequestBody::Json(body)))
            .await
    }

    async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        self.request(ApiRequest::new(Method::POST, path, RequestBody::Empty))
            .await
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request(ApiRequest::delete(path)).await
    }

    /// `GET health`. Any success status counts as healthy.
    async fn health(&self) -> ClientResult<()> {
        self.get("health").await.map(|_| ())
    }
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is required".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        // headers arrived, so a broken body is a bad response, not a lost one
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| server_message(&body))
                .or_else(|| {
                    let trimmed = text.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                });
            warn!(status = status.as_u16(), message = ?message, "Request failed");
            return Err(ClientError::Http { status, message });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))?;

        let ack = ActionResponse::from_value(&body);
        if ack.is_rejected() {
            let message = ack.message.unwrap_or_else(|| "Request rejected".into());
            warn!(status = status.as_u16(), %message, "Request rejected by server");
            return Err(ClientError::Rejected { message });
        }

        Ok(body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn request(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = self.url(&request.path);
        debug!(method = %request.method, path = %request.path, "Sending request");

        let mut req = self.client.request(request.method, &url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req = match &request.body {
            RequestBody::Empty => req,
            RequestBody::Form(pairs) => req.form(pairs),
            RequestBody::Json(body) => req.json(body),
        };

        let response = req.send().await?;
        self.handle_response(response).await
    }
}
