//! # Gateway Core
//!
//! Core types, traits, and error handling for the generation gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - Generation request and result types
//! - Provider descriptors and the adapter trait each backend implements
//! - Wire-level request/response types and the HTTP transport seam
//! - Credential lookup
//! - Per-provider outcomes and the terminal error type

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credentials;
pub mod error;
pub mod outcome;
pub mod provider;
pub mod request;
pub mod response;
pub mod wire;

// Re-export commonly used types
pub use credentials::{CredentialStore, EnvCredentialStore, StaticCredentialStore};
pub use error::{FailureReason, GatewayError, GatewayResult, ProviderFailure};
pub use outcome::{FailureCause, ProviderOutcome};
pub use provider::{ApiStyle, AuthScheme, ProviderAdapter, ProviderDescriptor};
pub use request::{GenerationRequest, QualityHint};
pub use response::GenerationResult;
pub use wire::{HttpTransport, TransportError, WireRequest, WireResponse};
