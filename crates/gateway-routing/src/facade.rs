//! Generation facade.
//!
//! The single entry point for callers: validates the request, runs the fallback
//! orchestrator and returns either a result with provenance or one [`GatewayError`].

use crate::orchestrator::FallbackOrchestrator;
use gateway_config::GatewayConfig;
use gateway_core::{
    CredentialStore, EnvCredentialStore, GatewayError, GatewayResult, GenerationRequest,
    GenerationResult, HttpTransport, ProviderDescriptor, QualityHint,
};
use gateway_providers::{ProviderRegistry, ReqwestTransport};
use gateway_resilience::{ProviderCaller, RetryConfig, RetryPolicy};
use gateway_telemetry::GatewayMetrics;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Accepted sampling temperature range
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Resilient multi-provider text generation
#[derive(Debug, Clone)]
pub struct GenerationGateway {
    orchestrator: Arc<FallbackOrchestrator>,
}

impl GenerationGateway {
    /// Start building a gateway
    #[must_use]
    pub fn builder() -> GenerationGatewayBuilder {
        GenerationGatewayBuilder::new()
    }

    /// Wrap an existing orchestrator
    #[must_use]
    pub fn new(orchestrator: FallbackOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build a gateway from validated configuration, reading credentials from the
    /// process environment
    ///
    /// # Errors
    /// Returns a configuration error if the config is invalid or the HTTP client
    /// cannot be created
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        GenerationGatewayBuilder::from_config(config)?.build()
    }

    /// Generate text with a fresh, never-cancelled token
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidRequest`] for a malformed request, otherwise
    /// [`GatewayError::AllProvidersExhausted`] when no provider produced text
    pub async fn generate(&self, request: GenerationRequest) -> GatewayResult<GenerationResult> {
        self.generate_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Generate text, aborting promptly once `cancel` fires
    ///
    /// # Errors
    /// As [`generate`](Self::generate), plus [`GatewayError::Cancelled`]
    pub async fn generate_with_cancellation(
        &self,
        request: GenerationRequest,
        cancel: &CancellationToken,
    ) -> GatewayResult<GenerationResult> {
        validate_request(&request)?;
        self.orchestrator.run(&request, cancel).await
    }

    /// Shorthand for the common call shape
    ///
    /// # Errors
    /// As [`generate`](Self::generate)
    pub async fn generate_text(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        max_output_tokens: u32,
        quality_hint: Option<QualityHint>,
    ) -> GatewayResult<GenerationResult> {
        let mut request = GenerationRequest::new(system_prompt, user_prompt, max_output_tokens);
        request.quality_hint = quality_hint;
        self.generate(request).await
    }

    /// Provider registry
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        self.orchestrator.registry()
    }

    /// Metrics, if attached
    #[must_use]
    pub fn metrics(&self) -> Option<&GatewayMetrics> {
        self.orchestrator.metrics()
    }
}

/// Check a request before any provider is contacted
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] naming the offending field
pub fn validate_request(request: &GenerationRequest) -> GatewayResult<()> {
    if request.system_prompt.trim().is_empty() {
        return Err(GatewayError::invalid_request("system_prompt must not be empty"));
    }
    if request.user_prompt.trim().is_empty() {
        return Err(GatewayError::invalid_request("user_prompt must not be empty"));
    }
    if request.max_output_tokens == 0 {
        return Err(GatewayError::invalid_request(
            "max_output_tokens must be greater than 0",
        ));
    }
    if let Some(temperature) = request.temperature {
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(GatewayError::invalid_request(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }
    }
    Ok(())
}

/// Builder for [`GenerationGateway`]
#[derive(Default)]
pub struct GenerationGatewayBuilder {
    descriptors: Vec<ProviderDescriptor>,
    registry: Option<ProviderRegistry>,
    transport: Option<Arc<dyn HttpTransport>>,
    credentials: Option<Arc<dyn CredentialStore>>,
    policy: RetryPolicy,
    metrics: Option<GatewayMetrics>,
}

impl GenerationGatewayBuilder {
    /// Create a builder with default retry policy and no providers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a builder from validated configuration: its providers, retry budget,
    /// timeouts, and credentials from the process environment
    ///
    /// # Errors
    /// Returns a configuration error if the config is invalid or the HTTP client
    /// cannot be created
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        config
            .ensure_valid()
            .map_err(|e| GatewayError::configuration(e.to_string()))?;

        let transport =
            ReqwestTransport::new(config.http.request_timeout, config.http.connect_timeout)?;

        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: config.retry.max_attempts,
            base_delay: config.retry.base_delay,
            max_delay: config.retry.max_delay,
            fast_fail_status: config.retry.fast_fail_status.clone(),
        });

        Ok(Self::new()
            .providers(config.descriptors())
            .transport(Arc::new(transport))
            .credentials(Arc::new(EnvCredentialStore::new()))
            .retry_policy(policy))
    }

    /// Add a provider
    #[must_use]
    pub fn provider(mut self, descriptor: ProviderDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Add several providers
    #[must_use]
    pub fn providers(mut self, descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Start from an existing registry (custom adapters)
    #[must_use]
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the HTTP transport (defaults to reqwest with 30s timeout)
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the credential store (defaults to the process environment)
    #[must_use]
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach metrics
    #[must_use]
    pub fn metrics(mut self, metrics: GatewayMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the gateway
    ///
    /// # Errors
    /// Returns a configuration error for malformed or duplicate providers, or if the
    /// default HTTP client cannot be created
    pub fn build(self) -> GatewayResult<GenerationGateway> {
        let mut registry = self.registry.unwrap_or_default();
        for descriptor in self.descriptors {
            registry.register(gateway_providers::adapter_for(descriptor))?;
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_defaults()?),
        };
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(EnvCredentialStore::new()));

        info!(
            providers = ?registry.names(),
            max_attempts = self.policy.max_attempts(),
            "Generation gateway ready"
        );

        let caller = ProviderCaller::new(transport, credentials, self.policy);
        let mut orchestrator = FallbackOrchestrator::new(registry, caller);
        if let Some(metrics) = self.metrics {
            orchestrator = orchestrator.with_metrics(metrics);
        }

        Ok(GenerationGateway::new(orchestrator))
    }
}
