//! Request types for the gateway.
//!
//! A [`GenerationRequest`] is the provider-agnostic input every call site builds: two
//! prompt strings plus generation parameters. Adapters translate it into each
//! backend's wire format.

use serde::{Deserialize, Serialize};

/// Requested quality tier.
///
/// `Premium` asks providers that expose model tiers for their stronger model.
/// Providers without tiers ignore the hint and use their default model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityHint {
    /// Default, cheaper model
    #[default]
    Fast,
    /// Stronger model where available
    Premium,
}

impl QualityHint {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for QualityHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "premium" => Ok(Self::Premium),
            other => Err(format!("unknown quality hint '{other}' (expected fast or premium)")),
        }
    }
}

/// Unified generation request that abstracts all providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System instruction
    pub system_prompt: String,

    /// User payload
    pub user_prompt: String,

    /// Maximum tokens to generate
    pub max_output_tokens: u32,

    /// Optional quality tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_hint: Option<QualityHint>,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ask the provider for a JSON document instead of free text
    #[serde(default)]
    pub json_response: bool,
}

impl GenerationRequest {
    /// Create a request with the two prompts and a token budget
    #[must_use]
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_output_tokens,
            quality_hint: None,
            temperature: None,
            json_response: false,
        }
    }

    /// Set the quality hint
    #[must_use]
    pub fn with_quality(mut self, hint: QualityHint) -> Self {
        self.quality_hint = Some(hint);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request a JSON response
    #[must_use]
    pub fn with_json_response(mut self, json: bool) -> Self {
        self.json_response = json;
        self
    }

    /// Whether the premium tier was requested
    #[must_use]
    pub fn wants_premium(&self) -> bool {
        self.quality_hint == Some(QualityHint::Premium)
    }
}
