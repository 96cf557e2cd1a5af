//! # Gateway Routing
//!
//! Cascading fallback across generation providers.
//!
//! This crate provides:
//! - The fallback orchestrator that tries providers in priority order and stops at
//!   the first usable result
//! - Completion text normalization
//! - The generation facade, the only surface callers need

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod facade;
pub mod normalize;
pub mod orchestrator;

// Re-export main types
pub use facade::{validate_request, GenerationGateway, GenerationGatewayBuilder};
pub use normalize::normalize_completion;
pub use orchestrator::FallbackOrchestrator;
pub use tokio_util::sync::CancellationToken;
