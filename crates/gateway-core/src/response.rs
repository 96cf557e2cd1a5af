//! Response types for the gateway.

use serde::{Deserialize, Serialize};

/// Successful gateway output: normalized text plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Normalized completion text
    pub text: String,
    /// Name of the provider that served the request
    pub provider_name: String,
    /// Model the provider was asked to use
    pub model_used: String,
}

impl GenerationResult {
    /// Create a new result
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        provider_name: impl Into<String>,
        model_used: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            provider_name: provider_name.into(),
            model_used: model_used.into(),
        }
    }
}
