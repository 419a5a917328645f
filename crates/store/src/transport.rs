// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the GitHub REST API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTPS requests for production
//! - In-memory fakes for unit testing

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::debug;

/// Media type requested from the API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// API version pinned on every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Default API endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Error type for transport operations.
///
/// Only failures below HTTP land here. A response with any status code is a
/// successful transport round trip.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Could not build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Connection failed or was interrupted.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// HTTP verbs used against the contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the request changes repository contents.
    pub fn is_write(&self) -> bool {
        matches!(self, Method::Put | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One API call, addressed relative to the API base.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and query, starting with `/`.
    pub path: String,
    /// Bearer token sent in the authorization header.
    pub token: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, token: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            token: token.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("token", &"<redacted>")
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// Status code and decoded body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// JSON body, `Value::Null` when empty, or the raw text as a string when
    /// the body is not JSON.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        ApiResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field GitHub puts in error bodies.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Transport trait for request/response API calls.
///
/// This trait abstracts over the actual HTTP client, allowing
/// for easy testing with in-memory implementations. It takes `&self` because
/// reads are not serialized: several requests may be in flight at once.
pub trait Transport: Send + Sync {
    /// Execute one request and return whatever status the server answered.
    fn execute(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<ApiResponse>> + Send + '_>>;
}

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the API, without trailing slash.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header (GitHub rejects requests without one).
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            api_base: GITHUB_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("devhub/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTPS transport implementation using reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: HttpConfig) -> TransportResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| TransportError::Client(e.to_string()))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(HttpTransport {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<ApiResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = self.url(&request.path);
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &url);
            let auth = HeaderValue::from_str(&format!("Bearer {}", request.token))
                .map_err(|e| TransportError::Client(e.to_string()))?;
            builder = builder.header(AUTHORIZATION, auth);
            if let Some(ref body) = request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::ConnectionFailed(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let text = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::ReceiveFailed(e.to_string())
                }
            })?;
            debug!(method = %request.method, path = %request.path, status, "github response");

            Ok(ApiResponse::new(status, parse_body(&text)))
        })
    }
}

/// Decodes a response body, keeping non-JSON text readable in error messages.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
