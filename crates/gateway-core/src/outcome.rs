//! Classified result of running one provider.

use std::fmt;

/// Why the last attempt against a provider failed transiently
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Non-2xx status other than the fast-fail set
    Status(u16),
    /// Network-level failure (timeout, DNS, reset)
    Network(String),
}

impl FailureCause {
    /// Status code, if the failure carried one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Network(_) => None,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Network(message) => write!(f, "network error: {message}"),
        }
    }
}

/// Result of one provider run, consumed by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// 2xx response; text has not been extracted yet
    Success {
        /// Raw response body
        raw_body: String,
        /// HTTP status
        http_status: u16,
        /// Model named in the request
        model: String,
        /// Attempts used, including the successful one
        attempts: u32,
    },
    /// Every attempt failed transiently
    RetryableFailure {
        /// Cause of the last attempt's failure
        cause: FailureCause,
        /// Attempts used
        attempts: u32,
    },
    /// Rate limited or quota exhausted; no retry was made
    FastFailFailure {
        /// HTTP status (429 or 402 by default)
        http_status: u16,
    },
    /// Credential missing; no call was made
    NotConfigured,
    /// The surrounding request was cancelled
    Cancelled,
}

impl ProviderOutcome {
    /// Whether the provider returned a 2xx response
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Last HTTP status observed, if any
    #[must_use]
    pub fn last_status(&self) -> Option<u16> {
        match self {
            Self::Success { http_status, .. } | Self::FastFailFailure { http_status } => {
                Some(*http_status)
            }
            Self::RetryableFailure { cause, .. } => cause.status(),
            Self::NotConfigured | Self::Cancelled => None,
        }
    }

    /// Short label used in logs and metrics
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::RetryableFailure { .. } => "transient",
            Self::FastFailFailure { .. } => "rate_limited",
            Self::NotConfigured => "not_configured",
            Self::Cancelled => "cancelled",
        }
    }
}
