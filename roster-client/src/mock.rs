//! In-memory [`HttpClient`] that records every request
//!
//! Routes are matched on method and exact path (query string included).
//! Unmatched requests answer 404 so a missing route shows up as a failure.

use std::sync::Mutex;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::http::{ApiRequest, HttpClient};
use crate::{ClientError, ClientResult};

/// Canned answer for a route
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 2xx with this body
    Json(Value),
    /// Non-success status with an optional server message
    Status(StatusCode, Option<String>),
    /// 2xx with `"success": false`
    Rejected(String),
}

#[derive(Debug, Default)]
pub struct RecordingHttpClient {
    routes: Mutex<Vec<(Method, String, MockResponse)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the answer for `method path`
    pub fn on(&self, method: Method, path: impl Into<String>, response: MockResponse) -> &Self {
        let path = path.into();
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        routes.retain(|(m, p, _)| !(*m == method && *p == path));
        routes.push((method, path, response));
        self
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Requests other than GET
    pub fn mutations(&self) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait]
impl HttpClient for RecordingHttpClient {
    async fn request(&self, request: ApiRequest) -> ClientResult<Value> {
        let answer = {
            let routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
            routes
                .iter()
                .find(|(m, p, _)| *m == request.method && *p == request.path)
                .map(|(_, _, r)| r.clone())
        };
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match answer {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status(status, message)) => Err(ClientError::Http { status, message }),
            Some(MockResponse::Rejected(message)) => Err(ClientError::Rejected { message }),
            None => Err(ClientError::Http {
                status: StatusCode::NOT_FOUND,
                message: Some(format!("no mock route for {} {}", request.method, request.path)),
            }),
        }
    }
}
