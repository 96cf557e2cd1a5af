//! # Gateway Config
//!
//! Configuration for the generation gateway.
//!
//! Configuration is read from YAML or TOML, overlaid with `GATEWAY_*` environment
//! variables, and validated before the gateway is assembled. When no file exists the
//! built-in provider chain is used.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod provider;

pub use error::ConfigError;
pub use gateway_telemetry::LoggingConfig;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, resolve_config_path, CONFIG_ENV_VAR,
};
pub use provider::{default_providers, ProviderConfig};

use gateway_core::ProviderDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use validator::Validate;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// Candidate providers; order in the file does not matter
    #[validate(nested)]
    pub providers: Vec<ProviderConfig>,

    /// Per-provider retry budget
    #[validate(nested)]
    pub retry: RetrySettings,

    /// HTTP client settings
    #[validate(nested)]
    pub http: HttpSettings,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            retry: RetrySettings::default(),
            http: HttpSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Retry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RetrySettings {
    /// Attempts per provider, including the first
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,

    /// Delay before the second attempt; grows linearly
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,

    /// Cap on any single delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,

    /// Statuses that abandon a provider without retrying
    pub fast_fail_status: Vec<u16>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            fast_fail_status: vec![402, 429],
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HttpSettings {
    /// Bound on each provider call
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Bound on connection establishment
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Parse a YAML document
    ///
    /// # Errors
    /// Returns error if the document is not valid YAML for this schema
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a TOML document
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this schema
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Enabled providers
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Descriptors for enabled providers, in ascending priority order
    #[must_use]
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        let mut descriptors: Vec<ProviderDescriptor> = self
            .enabled_providers()
            .map(ProviderConfig::to_descriptor)
            .collect();
        descriptors.sort_by_key(|d| d.priority);
        descriptors
    }

    /// Validate the whole configuration
    ///
    /// # Errors
    /// Returns error on field violations, duplicate names, duplicate priorities among
    /// enabled providers, or endpoints that do not parse
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;

        if self.retry.fast_fail_status.iter().any(|s| !(100..600).contains(s)) {
            return Err(ConfigError::Validation(
                "retry.fast_fail_status entries must be HTTP status codes".to_string(),
            ));
        }

        if self.retry.max_delay < self.retry.base_delay {
            return Err(ConfigError::Validation(
                "retry.max_delay must not be shorter than retry.base_delay".to_string(),
            ));
        }

        if self.http.request_timeout.is_zero() || self.http.connect_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "http timeouts must be greater than zero".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for provider in &self.providers {
            if !names.insert(provider.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate provider name '{}'",
                    provider.name
                )));
            }
        }

        let mut priorities = HashSet::new();
        for provider in self.enabled_providers() {
            if !priorities.insert(provider.priority) {
                return Err(ConfigError::Validation(format!(
                    "priority {} is used by more than one enabled provider",
                    provider.priority
                )));
            }
            provider
                .to_descriptor()
                .validate()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        Ok(())
    }
}
