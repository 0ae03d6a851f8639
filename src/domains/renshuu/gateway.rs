//! Remote Gateway - authenticated HTTP round-trips to the Renshuu API.
//!
//! The [`Gateway`] trait is the seam between the name-resolution layer and
//! the network. [`HttpGateway`] is the production implementation: one
//! `reqwest::Client` per server run, created with the bearer credential baked
//! into its default headers so concurrent requests only ever read it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::error::GatewayError;

/// Default base URL of the Renshuu REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.renshuu.org/v1";

/// Fixed ceiling for a single remote call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Request / Response
// ============================================================================

/// A single call to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/word/search`.
    pub path: String,
    /// Query parameters, sent in order.
    pub params: Vec<(String, String)>,
    /// Raw request body, sent as `application/json`.
    pub body: Option<Vec<u8>>,
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Attach a raw body. Empty bodies are dropped.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Look up the first query parameter with the given key.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Response body, kept verbatim when it is not valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

impl ResponseBody {
    /// Parse a response text, falling back to the raw text.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(text),
        }
    }

    /// Embed the body in a JSON document; raw text becomes `{"raw": text}`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Raw(raw) => serde_json::json!({ "raw": raw }),
        }
    }
}

/// Status code plus body of a completed call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl GatewayResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self::new(status, ResponseBody::Json(value))
    }

    pub fn raw(status: u16, text: impl Into<String>) -> Self {
        Self::new(status, ResponseBody::Raw(text.into()))
    }

    /// 2xx and 3xx responses count as success.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

// ============================================================================
// Gateway trait
// ============================================================================

/// Issues authenticated calls to the remote service.
///
/// Implementations must not retry and must return non-2xx responses as
/// ordinary [`GatewayResponse`] values.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn call(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// reqwest-backed gateway shared by every request of a server run.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    authenticated: bool,
}

impl HttpGateway {
    /// Build the session client.
    ///
    /// A missing key is accepted here; calls fail with
    /// [`GatewayError::MissingCredentials`] instead.
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| GatewayError::InvalidCredentials)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("renshuu-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::Build)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            authenticated: api_key.is_some(),
        })
    }

    /// Join the base URL and a relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn call(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        if !self.authenticated {
            return Err(GatewayError::MissingCredentials);
        }

        let mut builder = self
            .http
            .request(request.method, self.url_for(&request.path));
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Renshuu API request failed: {}", e);
            GatewayError::from_reqwest(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(GatewayError::from_reqwest)?;
        debug!(status, bytes = text.len(), "Renshuu API responded");

        Ok(GatewayResponse::new(status, ResponseBody::parse(text)))
    }
}
