//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter`. `RUST_LOG` takes
//! precedence over the configured level so operators can raise verbosity for a
//! single module without touching the config file.

use crate::error::TelemetryError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `gateway_routing=debug`)
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with the given level
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Switch JSON output on or off
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Show or hide event targets
    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Build the filter, preferring `RUST_LOG` when it is set and valid
    ///
    /// # Errors
    /// Returns error if the configured level is not a valid filter directive
    pub fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| TelemetryError::Logging(format!("invalid level '{}': {e}", self.level))),
        }
    }
}

/// Initialize logging with the given configuration
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
/// Returns error if the filter is invalid or a subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = config.env_filter()?;

    let layer = if config.json {
        fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::Logging(e.to_string()))?;

    debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

/// Create a span for one orchestrated generation
#[macro_export]
macro_rules! generation_span {
    ($providers:expr, $quality:expr) => {
        tracing::info_span!(
            "generation",
            providers = $providers,
            quality = %$quality,
        )
    };
}

/// Create a span for provider communication
#[macro_export]
macro_rules! provider_span {
    ($provider:expr, $priority:expr) => {
        tracing::info_span!(
            "provider_call",
            provider = %$provider,
            priority = $priority,
        )
    };
}
