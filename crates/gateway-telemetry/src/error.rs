//! Telemetry errors.

/// Telemetry initialization error
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or the filter is invalid
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// A metric could not be created or registered
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// The registry could not be rendered
    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}
