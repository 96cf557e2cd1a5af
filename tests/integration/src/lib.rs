//! Integration tests for the generation gateway
//!
//! This crate drives the full stack (facade, orchestrator, caller, adapters and the
//! reqwest transport) against wiremock servers:
//! - Fallback ordering, fast-fail and retry budgets
//! - Empty-content fallback and total exhaustion
//! - Wire format of both provider styles
//! - Cancellation

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;
pub use mock_providers::*;

#[cfg(test)]
mod fallback_tests;
#[cfg(test)]
mod provider_tests;
