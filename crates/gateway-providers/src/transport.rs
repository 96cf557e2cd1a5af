//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use gateway_core::{GatewayError, HttpTransport, TransportError, WireRequest, WireResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// Sends wire requests as JSON POSTs with a bounded per-call timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Default per-call timeout (30 seconds)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default connection timeout (10 seconds)
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a transport with the given request and connect timeouts
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout.min(timeout))
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| GatewayError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Create a transport with default timeouts
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn with_defaults() -> Result<Self, GatewayError> {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_CONNECT_TIMEOUT)
    }

    /// Per-call timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Map a reqwest error, dropping the URL since it may carry a credential
    fn classify(&self, error: reqwest::Error) -> TransportError {
        let error = error.without_url();
        if error.is_timeout() {
            TransportError::Timeout(format!("no response within {}ms", self.timeout.as_millis()))
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                TransportError::Timeout(format!("body not received within {}ms", self.timeout.as_millis()))
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        trace!(url = %request.redacted_url(), status, bytes = body.len(), "Received provider response");

        Ok(WireResponse { status, body })
    }
}
