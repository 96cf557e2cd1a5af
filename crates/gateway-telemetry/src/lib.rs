//! # Gateway Telemetry
//!
//! Observability for the generation gateway.
//!
//! This crate provides:
//! - Structured logging setup on top of `tracing-subscriber`
//! - Span helpers for generations and provider calls
//! - Prometheus metrics for provider attempts and request results

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

// Re-export main types
pub use error::TelemetryError;
pub use logging::{init_logging, LoggingConfig};
pub use metrics::GatewayMetrics;
