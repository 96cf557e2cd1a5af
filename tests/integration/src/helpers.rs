//! Test helper utilities for integration tests

use gateway_core::{CredentialStore, ProviderDescriptor};
use gateway_providers::ReqwestTransport;
use gateway_resilience::{RetryPolicy, RetryPolicyBuilder};
use gateway_routing::GenerationGateway;
use gateway_telemetry::GatewayMetrics;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Backoff base used by integration tests
pub const TEST_BASE_DELAY: Duration = Duration::from_millis(50);

/// Per-call timeout used by integration tests
pub const TEST_TIMEOUT: Duration = Duration::from_millis(300);

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Retry policy with the given budget and a short linear backoff
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicyBuilder::new()
        .max_attempts(max_attempts)
        .base_delay(TEST_BASE_DELAY)
        .build()
}

/// Gateway over real HTTP with short timeouts
pub fn build_gateway(
    providers: Vec<ProviderDescriptor>,
    credentials: impl CredentialStore + 'static,
    max_attempts: u32,
) -> GenerationGateway {
    build_gateway_with_metrics(providers, credentials, max_attempts, None)
}

/// Gateway over real HTTP with short timeouts and optional metrics
pub fn build_gateway_with_metrics(
    providers: Vec<ProviderDescriptor>,
    credentials: impl CredentialStore + 'static,
    max_attempts: u32,
    metrics: Option<GatewayMetrics>,
) -> GenerationGateway {
    init_tracing();

    let transport = ReqwestTransport::new(TEST_TIMEOUT, TEST_TIMEOUT).expect("http client");
    let mut builder = GenerationGateway::builder()
        .providers(providers)
        .transport(Arc::new(transport))
        .credentials(Arc::new(credentials))
        .retry_policy(fast_policy(max_attempts));
    if let Some(metrics) = metrics {
        builder = builder.metrics(metrics);
    }
    builder.build().expect("gateway")
}

/// First path segment (the provider name) of every request, in arrival order
pub async fn request_order(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| {
            r.url
                .path()
                .trim_start_matches('/')
                .split('/')
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Number of requests that reached a provider
pub async fn calls_to(server: &MockServer, name: &str) -> usize {
    request_order(server)
        .await
        .iter()
        .filter(|n| n.as_str() == name)
        .count()
}
