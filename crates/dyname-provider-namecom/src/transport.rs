//! HTTP transport for the registrar client
//!
//! The client builds [`ApiRequest`]s and interprets [`ApiResponse`]s; a
//! [`Transport`] only moves bytes. Status handling therefore lives in one
//! place regardless of the transport in use.

use async_trait::async_trait;
use dyname_core::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP method of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
        }
    }
}

/// A request against the registrar API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters, in order
    pub query: Vec<(&'static str, String)>,
    /// JSON body (PUT only)
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>, query: Vec<(&'static str, String)>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query,
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Method and URL, for logs and error messages
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Account credentials, sent as HTTP basic auth on every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    /// ⚠️ NEVER log this value
    pub api_key: String,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials, failing fast if either part is empty
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let api_key = api_key.into();

        if username.is_empty() {
            return Err(Error::config("name.com username cannot be empty"));
        }
        if api_key.is_empty() {
            return Err(Error::config("name.com API key cannot be empty"));
        }

        Ok(Self { username, api_key })
    }
}

/// Something that can execute an [`ApiRequest`]
///
/// Implementations report connection-level failures as [`Error::Transport`] and
/// return every received response, whatever its status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest, credentials: &Credentials) -> Result<ApiResponse>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the default timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest, credentials: &Credentials) -> Result<ApiResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Put => self.client.put(&request.url),
        };

        let mut builder = builder
            .basic_auth(&credentials.username, Some(&credentials.api_key))
            .header("Content-Type", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            Error::transport(format!("{} failed: {}", request.describe(), e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            Error::transport(format!(
                "{}: failed to read response body: {}",
                request.describe(),
                e
            ))
        })?;

        Ok(ApiResponse { status, body })
    }
}
