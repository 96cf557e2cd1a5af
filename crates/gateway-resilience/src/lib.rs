//! # Gateway Resilience
//!
//! Resilience patterns for the generation gateway:
//! - Retry policy with linear backoff and status classification
//! - Single-provider caller that runs one backend through its retry budget and
//!   classifies the outcome for the orchestrator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod caller;
pub mod retry;

// Re-export main types
pub use caller::ProviderCaller;
pub use retry::{RetryConfig, RetryPolicy, RetryPolicyBuilder, StatusClass};
