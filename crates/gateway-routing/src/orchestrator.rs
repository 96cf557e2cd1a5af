//! Fallback orchestration.
//!
//! Walks the registry in ascending priority order, one provider at a time, and stops
//! at the first provider whose response yields non-empty text. Every other outcome
//! (missing credential, rate limit, spent retry budget, empty content) is recorded and
//! the next provider is tried. One call makes exactly one pass over the registry.

use crate::normalize::normalize_completion;
use gateway_core::{
    FailureReason, GatewayError, GatewayResult, GenerationRequest, GenerationResult,
    ProviderAdapter, ProviderFailure, ProviderOutcome,
};
use gateway_providers::ProviderRegistry;
use gateway_resilience::ProviderCaller;
use gateway_telemetry::GatewayMetrics;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

/// Outcome label for a 2xx response without usable text
const EMPTY_CONTENT: &str = "empty_content";

/// Tries providers in priority order until one produces text
#[derive(Debug, Clone)]
pub struct FallbackOrchestrator {
    registry: ProviderRegistry,
    caller: ProviderCaller,
    metrics: Option<GatewayMetrics>,
}

impl FallbackOrchestrator {
    /// Create an orchestrator over a registry
    #[must_use]
    pub fn new(registry: ProviderRegistry, caller: ProviderCaller) -> Self {
        Self {
            registry,
            caller,
            metrics: None,
        }
    }

    /// Record provider and request outcomes into `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: GatewayMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Provider registry
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Metrics, if attached
    #[must_use]
    pub fn metrics(&self) -> Option<&GatewayMetrics> {
        self.metrics.as_ref()
    }

    /// Run one generation across the provider chain.
    ///
    /// # Errors
    /// Returns [`GatewayError::AllProvidersExhausted`] when no provider produced text,
    /// or [`GatewayError::Cancelled`] when `cancel` fires first
    pub async fn run(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> GatewayResult<GenerationResult> {
        let quality = request.quality_hint.unwrap_or_default();
        let span = gateway_telemetry::generation_span!(self.registry.len(), quality);

        let result = self.run_chain(request, cancel).instrument(span).await;

        if let Some(metrics) = &self.metrics {
            let label = match &result {
                Ok(_) => "success",
                Err(error) => error.error_type(),
            };
            metrics.record_request(label);
        }
        result
    }

    async fn run_chain(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> GatewayResult<GenerationResult> {
        let mut failures = Vec::with_capacity(self.registry.len());
        let mut attempted = 0;

        for provider in self.registry.providers() {
            if cancel.is_cancelled() {
                return Err(self.cancelled(attempted));
            }
            attempted += 1;

            let started = Instant::now();
            let outcome = self.caller.call(provider.as_ref(), request, cancel).await;

            let reason = match outcome {
                ProviderOutcome::Success {
                    raw_body,
                    http_status,
                    model,
                    attempts,
                } => {
                    let text =
                        normalize_completion(&provider.extract_text(&raw_body), request.json_response);

                    if !text.is_empty() {
                        self.record(provider.name(), "success", started);
                        info!(
                            provider = %provider.name(),
                            model = %model,
                            attempts,
                            providers_attempted = attempted,
                            bytes = text.len(),
                            "Generation succeeded"
                        );
                        return Ok(GenerationResult::new(text, provider.name(), model));
                    }

                    self.record(provider.name(), EMPTY_CONTENT, started);
                    warn!(
                        provider = %provider.name(),
                        status = http_status,
                        "Provider returned no usable text, falling back"
                    );
                    FailureReason::EmptyContent {
                        status: http_status,
                    }
                }
                ProviderOutcome::Cancelled => {
                    self.record(provider.name(), "cancelled", started);
                    return Err(self.cancelled(attempted));
                }
                other => {
                    self.record(provider.name(), other.label(), started);
                    let Some(reason) = FailureReason::from_outcome(&other) else {
                        continue;
                    };
                    debug!(provider = %provider.name(), outcome = other.label(), "Provider failed, falling back");
                    reason
                }
            };

            failures.push(ProviderFailure::new(provider.name(), reason));
        }

        let error = GatewayError::exhausted(attempted, failures);
        warn!(
            providers_attempted = attempted,
            last_status = ?error_last_status(&error),
            "All providers exhausted"
        );
        Err(error)
    }

    fn cancelled(&self, providers_attempted: usize) -> GatewayError {
        info!(providers_attempted, "Generation cancelled");
        GatewayError::Cancelled {
            providers_attempted,
        }
    }

    fn record(&self, provider: &str, outcome: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.record_provider(provider, outcome, started.elapsed());
        }
    }
}

fn error_last_status(error: &GatewayError) -> Option<u16> {
    match error {
        GatewayError::AllProvidersExhausted { last_status, .. } => *last_status,
        _ => None,
    }
}
