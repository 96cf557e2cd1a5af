//! Wire-level request/response types and the HTTP transport seam.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Concrete HTTP request for one provider call
#[derive(Clone, PartialEq)]
pub struct WireRequest {
    /// Fully resolved URL (may carry a credential in its query string)
    pub url: String,
    /// Headers (may carry a credential)
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Value,
    /// Model named in the request, reported as provenance
    pub model: String,
}

impl WireRequest {
    /// Create a request with no headers
    #[must_use]
    pub fn new(url: impl Into<String>, body: Value, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
            model: model.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL with the query string removed, safe to log
    #[must_use]
    pub fn redacted_url(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

impl fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, _)| (k.as_str(), "[REDACTED]"))
            .collect();

        f.debug_struct("WireRequest")
            .field("url", &self.redacted_url())
            .field("headers", &headers)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Raw HTTP response from a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl WireResponse {
    /// Create a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure; always treated as transient
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The call exceeded its timeout
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection could not be established (DNS, refused, reset)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other failure while sending
    #[error("request failed: {0}")]
    Request(String),
    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Issues wire requests. Implementations must bound each call with a timeout.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the status and body
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, TransportError>;
}
