//! Retry policy with linear backoff.
//!
//! Decides how often a single provider is tried and how long to wait between
//! attempts. Statuses fall into three classes: success, fast-fail (give up on this
//! provider at once), and transient (retry while budget remains).

use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts per provider, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; later delays grow linearly
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Statuses that abandon the provider without retrying
    pub fast_fail_status: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            fast_fail_status: vec![402, 429],
        }
    }
}

/// Classification of an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx
    Success,
    /// Rate limited or out of quota
    FastFail,
    /// Anything else; worth another attempt
    Transient,
}

/// Retry policy implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration
    #[must_use]
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Create a policy with a custom attempt budget
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self::new(RetryConfig {
            max_attempts,
            ..Default::default()
        })
    }

    /// Attempts per provider; never less than one
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Whether another attempt follows the given one (0-indexed)
    #[must_use]
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts()
    }

    /// Delay after a failed attempt (0-indexed): `base_delay * (attempt + 1)`, capped
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.config
            .base_delay
            .saturating_mul(attempt.saturating_add(1))
            .min(self.config.max_delay)
    }

    /// Classify an HTTP status
    #[must_use]
    pub fn classify_status(&self, status: u16) -> StatusClass {
        if (200..300).contains(&status) {
            StatusClass::Success
        } else if self.config.fast_fail_status.contains(&status) {
            StatusClass::FastFail
        } else {
            StatusClass::Transient
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for retry policy
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    config: RetryConfig,
}

impl RetryPolicyBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attempts per provider
    #[must_use]
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n;
        self
    }

    /// Set base delay
    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Set max delay
    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.max_delay = delay;
        self
    }

    /// Set status codes that fail fast
    #[must_use]
    pub fn fast_fail_status(mut self, codes: Vec<u16>) -> Self {
        self.config.fast_fail_status = codes;
        self
    }

    /// Build the policy
    #[must_use]
    pub fn build(self) -> RetryPolicy {
        RetryPolicy::new(self.config)
    }
}
