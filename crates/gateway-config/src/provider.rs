//! Provider entries and the built-in provider chain.

use gateway_core::{ApiStyle, AuthScheme, ProviderDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// One provider as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProviderConfig {
    /// Display name, reported as provenance
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// URL template; may contain `{model}`
    #[validate(length(min = 1, max = 2048))]
    pub endpoint: String,

    /// Name of the secret holding the API key
    #[validate(length(min = 1, max = 128))]
    pub credential_key: String,

    /// Model used by default
    #[validate(length(min = 1, max = 256))]
    pub default_model: String,

    /// Stronger model used for premium requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub premium_model: Option<String>,

    /// Lower is tried first
    pub priority: u32,

    /// Payload schema
    #[serde(default)]
    pub api_style: ApiStyle,

    /// Authentication scheme; defaults per API style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthScheme>,

    /// Static headers sent with every call
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Disabled providers are left out of the registry
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl ProviderConfig {
    /// Convert to a runtime descriptor
    #[must_use]
    pub fn to_descriptor(&self) -> ProviderDescriptor {
        let mut descriptor = ProviderDescriptor::new(
            &self.name,
            &self.endpoint,
            &self.credential_key,
            &self.default_model,
        )
        .with_priority(self.priority)
        .with_api_style(self.api_style);

        if let Some(premium) = &self.premium_model {
            descriptor = descriptor.with_premium_model(premium);
        }
        if let Some(auth) = &self.auth {
            descriptor = descriptor.with_auth(auth.clone());
        }
        for (name, value) in &self.headers {
            descriptor = descriptor.with_header(name, value);
        }
        descriptor
    }
}

/// Built-in chain: managed gateway, then OpenRouter, then Gemini direct
#[must_use]
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "ai-gateway".to_string(),
            endpoint: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
            credential_key: "LOVABLE_API_KEY".to_string(),
            default_model: "google/gemini-2.5-flash".to_string(),
            premium_model: Some("google/gemini-2.5-pro".to_string()),
            priority: 1,
            api_style: ApiStyle::ChatCompletions,
            auth: None,
            headers: BTreeMap::new(),
            enabled: true,
        },
        ProviderConfig {
            name: "openrouter".to_string(),
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            credential_key: "OPENROUTER_API_KEY".to_string(),
            default_model: "google/gemini-2.0-flash-001".to_string(),
            premium_model: Some("anthropic/claude-3.5-sonnet".to_string()),
            priority: 2,
            api_style: ApiStyle::ChatCompletions,
            auth: None,
            headers: BTreeMap::from([
                ("HTTP-Referer".to_string(), "https://github.com/generation-gateway".to_string()),
                ("X-Title".to_string(), "generation-gateway".to_string()),
            ]),
            enabled: true,
        },
        ProviderConfig {
            name: "gemini".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                .to_string(),
            credential_key: "GEMINI_API_KEY".to_string(),
            default_model: "gemini-2.0-flash".to_string(),
            premium_model: Some("gemini-2.5-pro".to_string()),
            priority: 3,
            api_style: ApiStyle::GenerateContent,
            auth: None,
            headers: BTreeMap::new(),
            enabled: true,
        },
    ]
}
