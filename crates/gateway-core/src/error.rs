//! Error types for the gateway.
//!
//! Per-provider failures are handled inside the orchestrator and only summarized
//! here; [`GatewayError`] is the single type that crosses the gateway boundary.

use crate::outcome::{FailureCause, ProviderOutcome};
use serde::Serialize;
use serde_json::{json, Value};

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Why one provider did not produce a usable result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Credential missing, provider skipped
    NotConfigured,
    /// 429/402, provider abandoned without retry
    RateLimited {
        /// HTTP status
        status: u16,
    },
    /// Retry budget spent on transient failures
    Transient {
        /// Last HTTP status, if the last failure had one
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        /// Last network error, if the last failure was network-level
        #[serde(skip_serializing_if = "Option::is_none")]
        network_error: Option<String>,
        /// Attempts used
        attempts: u32,
    },
    /// 2xx response without extractable text
    EmptyContent {
        /// HTTP status
        status: u16,
    },
}

impl FailureReason {
    /// Map a non-success outcome to a failure reason.
    ///
    /// Returns `None` for `Success` and `Cancelled`, which are not provider failures.
    #[must_use]
    pub fn from_outcome(outcome: &ProviderOutcome) -> Option<Self> {
        match outcome {
            ProviderOutcome::NotConfigured => Some(Self::NotConfigured),
            ProviderOutcome::FastFailFailure { http_status } => Some(Self::RateLimited {
                status: *http_status,
            }),
            ProviderOutcome::RetryableFailure { cause, attempts } => Some(Self::Transient {
                status: cause.status(),
                network_error: match cause {
                    FailureCause::Network(message) => Some(message.clone()),
                    FailureCause::Status(_) => None,
                },
                attempts: *attempts,
            }),
            ProviderOutcome::Success { .. } | ProviderOutcome::Cancelled => None,
        }
    }

    /// Last HTTP status carried by the reason
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotConfigured => None,
            Self::RateLimited { status } | Self::EmptyContent { status } => Some(*status),
            Self::Transient { status, .. } => *status,
        }
    }
}

/// Failure record for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    /// Provider name
    pub provider: String,
    /// What went wrong
    pub reason: FailureReason,
}

impl ProviderFailure {
    /// Create a failure record
    #[must_use]
    pub fn new(provider: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            provider: provider.into(),
            reason,
        }
    }
}

/// Main gateway error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request failed validation before any provider was tried
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong
        message: String,
    },

    /// Every provider in the registry failed
    #[error(
        "All providers exhausted after {providers_attempted} provider(s) (last status: {})",
        display_status(.last_status)
    )]
    AllProvidersExhausted {
        /// Providers visited, including skipped ones
        providers_attempted: usize,
        /// Last HTTP status observed across all providers
        last_status: Option<u16>,
        /// One record per provider, in the order tried
        failures: Vec<ProviderFailure>,
    },

    /// The caller cancelled the request mid-run
    #[error("Generation cancelled after {providers_attempted} provider(s)")]
    Cancelled {
        /// Providers visited before cancellation
        providers_attempted: usize,
    },

    /// Gateway could not be assembled from its configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was wrong
        message: String,
    },
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

impl GatewayError {
    /// Create an invalid request error
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an exhaustion error from per-provider failures.
    ///
    /// `last_status` is the last status carried by any failure, in order.
    #[must_use]
    pub fn exhausted(providers_attempted: usize, failures: Vec<ProviderFailure>) -> Self {
        let last_status = failures.iter().rev().find_map(|f| f.reason.status());
        Self::AllProvidersExhausted {
            providers_attempted,
            last_status,
            failures,
        }
    }

    /// Stable discriminator for the calling layer
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::AllProvidersExhausted { .. } => "all_providers_exhausted",
            Self::Cancelled { .. } => "cancelled",
            Self::Configuration { .. } => "configuration_error",
        }
    }

    /// Number of providers visited, where meaningful
    #[must_use]
    pub fn providers_attempted(&self) -> Option<usize> {
        match self {
            Self::AllProvidersExhausted {
                providers_attempted,
                ..
            }
            | Self::Cancelled {
                providers_attempted,
            } => Some(*providers_attempted),
            Self::InvalidRequest { .. } | Self::Configuration { .. } => None,
        }
    }

    /// Render the error as a JSON body for the calling layer
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut error = json!({
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let Some(attempted) = self.providers_attempted() {
            error["providers_attempted"] = json!(attempted);
        }
        if let Self::AllProvidersExhausted {
            last_status,
            failures,
            ..
        } = self
        {
            error["last_status"] = json!(last_status);
            error["failures"] = serde_json::to_value(failures).unwrap_or(Value::Null);
        }

        json!({ "error": error })
    }
}
