//! Single-provider caller.
//!
//! Runs one provider through its retry budget and returns a classified
//! [`ProviderOutcome`]. Expected failures (missing credential, bad status, network
//! error) never surface as errors; the orchestrator decides what happens next.

use crate::retry::{RetryPolicy, StatusClass};
use gateway_core::{
    CredentialStore, FailureCause, GenerationRequest, HttpTransport, ProviderAdapter,
    ProviderOutcome,
};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};

/// Executes one provider with bounded retries
#[derive(Clone)]
pub struct ProviderCaller {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialStore>,
    policy: RetryPolicy,
}

impl fmt::Debug for ProviderCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCaller")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ProviderCaller {
    /// Create a caller
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            credentials,
            policy,
        }
    }

    /// The retry policy in use
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run one provider.
    ///
    /// Network calls and backoff sleeps race against `cancel`; once it fires the
    /// caller returns [`ProviderOutcome::Cancelled`] without further attempts.
    pub async fn call(
        &self,
        provider: &dyn ProviderAdapter,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> ProviderOutcome {
        let span = gateway_telemetry::provider_span!(provider.name(), provider.descriptor().priority);
        self.run_attempts(provider, request, cancel)
            .instrument(span)
            .await
    }

    async fn run_attempts(
        &self,
        provider: &dyn ProviderAdapter,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> ProviderOutcome {
        let descriptor = provider.descriptor();

        let Some(credential) = self.credentials.resolve(&descriptor.credential_key).await else {
            warn!(
                provider = %descriptor.name,
                credential_key = %descriptor.credential_key,
                "Credential not configured, skipping provider"
            );
            return ProviderOutcome::NotConfigured;
        };

        let wire = provider.build_request(request, &credential);
        let max_attempts = self.policy.max_attempts();
        let mut last_cause = None;

        for attempt in 0..max_attempts {
            debug!(
                provider = %descriptor.name,
                model = %wire.model,
                url = %wire.redacted_url(),
                attempt = attempt + 1,
                max_attempts,
                "Sending generation request"
            );

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return ProviderOutcome::Cancelled,
                result = self.transport.send(&wire) => result,
            };

            let cause = match result {
                Ok(response) => match self.policy.classify_status(response.status) {
                    StatusClass::Success => {
                        return ProviderOutcome::Success {
                            raw_body: response.body,
                            http_status: response.status,
                            model: wire.model,
                            attempts: attempt + 1,
                        };
                    }
                    StatusClass::FastFail => {
                        warn!(
                            provider = %descriptor.name,
                            status = response.status,
                            attempt = attempt + 1,
                            "Provider rate limited or out of quota, moving on"
                        );
                        return ProviderOutcome::FastFailFailure {
                            http_status: response.status,
                        };
                    }
                    StatusClass::Transient => {
                        warn!(
                            provider = %descriptor.name,
                            status = response.status,
                            attempt = attempt + 1,
                            "Provider returned error status"
                        );
                        FailureCause::Status(response.status)
                    }
                },
                Err(error) => {
                    warn!(
                        provider = %descriptor.name,
                        error = %error,
                        attempt = attempt + 1,
                        "Provider request failed"
                    );
                    FailureCause::Network(error.to_string())
                }
            };
            last_cause = Some(cause);

            if self.policy.has_attempts_left(attempt) {
                let delay = self.policy.delay_for_attempt(attempt);
                debug!(
                    provider = %descriptor.name,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before retry"
                );

                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return ProviderOutcome::Cancelled,
                    () = tokio::time::sleep(delay) => {}
                }
            }
        }

        ProviderOutcome::RetryableFailure {
            cause: last_cause.unwrap_or_else(|| FailureCause::Network("no attempt made".into())),
            attempts: max_attempts,
        }
    }
}
