//! Prometheus metrics for the gateway.

use crate::error::TelemetryError;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

const NAMESPACE: &str = "generation_gateway";

/// Gateway metrics backed by a private Prometheus registry
#[derive(Clone)]
pub struct GatewayMetrics {
    registry: Registry,
    provider_attempts: IntCounterVec,
    requests: IntCounterVec,
    call_duration: HistogramVec,
}

impl GatewayMetrics {
    /// Create and register all metrics
    ///
    /// # Errors
    /// Returns error if a metric cannot be created or registered
    pub fn new() -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let provider_attempts = IntCounterVec::new(
            Opts::new("provider_attempts_total", "Provider runs by outcome").namespace(NAMESPACE),
            &["provider", "outcome"],
        )?;

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "Generation requests by result").namespace(NAMESPACE),
            &["result"],
        )?;

        let call_duration = HistogramVec::new(
            HistogramOpts::new(
                "provider_call_duration_seconds",
                "Wall time spent on one provider, retries included",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
            &["provider"],
        )?;

        registry.register(Box::new(provider_attempts.clone()))?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(call_duration.clone()))?;

        Ok(Self {
            registry,
            provider_attempts,
            requests,
            call_duration,
        })
    }

    /// Record the outcome of one provider run
    pub fn record_provider(&self, provider: &str, outcome: &str, elapsed: Duration) {
        self.provider_attempts
            .with_label_values(&[provider, outcome])
            .inc();
        self.call_duration
            .with_label_values(&[provider])
            .observe(elapsed.as_secs_f64());
    }

    /// Record the result of one generation request
    pub fn record_request(&self, result: &str) {
        self.requests.with_label_values(&[result]).inc();
    }

    /// Provider runs recorded for a provider and outcome
    #[must_use]
    pub fn provider_count(&self, provider: &str, outcome: &str) -> u64 {
        self.provider_attempts
            .with_label_values(&[provider, outcome])
            .get()
    }

    /// Requests recorded with a result
    #[must_use]
    pub fn request_count(&self, result: &str) -> u64 {
        self.requests.with_label_values(&[result]).get()
    }

    /// Underlying registry, for exposing through another exporter
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render all metrics in the Prometheus text format
    ///
    /// # Errors
    /// Returns error if encoding fails
    pub fn render(&self) -> Result<String, TelemetryError> {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .map_err(|e| TelemetryError::Encode(e.to_string()))
    }
}

impl std::fmt::Debug for GatewayMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayMetrics").finish_non_exhaustive()
    }
}
