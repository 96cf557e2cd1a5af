//! Provider descriptors and the adapter trait.
//!
//! A [`ProviderDescriptor`] is immutable configuration for one backend. A
//! [`ProviderAdapter`] pairs a descriptor with the logic that speaks that backend's
//! wire format; the registry is an ordered list of adapters.

use crate::error::GatewayError;
use crate::request::{GenerationRequest, QualityHint};
use crate::wire::WireRequest;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder substituted with the selected model inside an endpoint template
pub const MODEL_PLACEHOLDER: &str = "{model}";

/// Payload schema spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStyle {
    /// OpenAI-style `messages` array, text at `choices[0].message.content`
    #[default]
    ChatCompletions,
    /// Single content blob with `generationConfig`, text at
    /// `candidates[0].content.parts[0].text`
    GenerateContent,
}

impl ApiStyle {
    /// Authentication scheme used when the descriptor does not set one
    #[must_use]
    pub fn default_auth(&self) -> AuthScheme {
        match self {
            Self::ChatCompletions => AuthScheme::Bearer,
            Self::GenerateContent => AuthScheme::QueryParam {
                name: "key".to_string(),
            },
        }
    }

    /// Stable snake_case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatCompletions => "chat_completions",
            Self::GenerateContent => "generate_content",
        }
    }
}

/// How the credential is attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Key appended as a URL query parameter
    QueryParam {
        /// Query parameter name
        name: String,
    },
    /// Key sent verbatim in a named header
    Header {
        /// Header name
        name: String,
    },
}

/// Immutable description of one candidate backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Display identity, reported as provenance
    pub name: String,
    /// URL template; may contain `{model}`
    pub endpoint: String,
    /// Name looked up in the credential store
    pub credential_key: String,
    /// Model used unless a stronger tier is requested
    pub default_model: String,
    /// Stronger model for premium requests, if the provider has tiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_model: Option<String>,
    /// Lower is tried first
    pub priority: u32,
    /// Payload schema
    #[serde(default)]
    pub api_style: ApiStyle,
    /// Explicit authentication scheme; falls back to the style's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthScheme>,
    /// Static headers sent with every call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_headers: Vec<(String, String)>,
}

impl ProviderDescriptor {
    /// Create a chat-completions descriptor with priority 0
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        credential_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            credential_key: credential_key.into(),
            default_model: default_model.into(),
            premium_model: None,
            priority: 0,
            api_style: ApiStyle::ChatCompletions,
            auth: None,
            extra_headers: Vec::new(),
        }
    }

    /// Set the priority
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the payload schema
    #[must_use]
    pub fn with_api_style(mut self, api_style: ApiStyle) -> Self {
        self.api_style = api_style;
        self
    }

    /// Set an explicit authentication scheme
    #[must_use]
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the premium model tier
    #[must_use]
    pub fn with_premium_model(mut self, model: impl Into<String>) -> Self {
        self.premium_model = Some(model.into());
        self
    }

    /// Add a static header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Effective authentication scheme
    #[must_use]
    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth
            .clone()
            .unwrap_or_else(|| self.api_style.default_auth())
    }

    /// Whether the provider exposes a premium tier
    #[must_use]
    pub fn supports_tiers(&self) -> bool {
        self.premium_model.is_some()
    }

    /// Model to use for the given hint
    #[must_use]
    pub fn model_for(&self, hint: Option<QualityHint>) -> &str {
        match (hint, self.premium_model.as_deref()) {
            (Some(QualityHint::Premium), Some(premium)) => premium,
            _ => &self.default_model,
        }
    }

    /// Endpoint with the model placeholder substituted
    #[must_use]
    pub fn endpoint_for(&self, model: &str) -> String {
        self.endpoint.replace(MODEL_PLACEHOLDER, model)
    }

    /// Check that the descriptor is well formed
    ///
    /// # Errors
    /// Returns a configuration error naming the offending field
    pub fn validate(&self) -> Result<(), GatewayError> {
        let invalid = |field: &str| {
            GatewayError::configuration(format!("provider '{}': {field} must not be empty", self.name))
        };

        if self.name.trim().is_empty() {
            return Err(GatewayError::configuration("provider name must not be empty"));
        }
        if self.credential_key.trim().is_empty() {
            return Err(invalid("credential_key"));
        }
        if self.default_model.trim().is_empty() {
            return Err(invalid("default_model"));
        }
        if self.premium_model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(invalid("premium_model"));
        }

        let url = Url::parse(&self.endpoint_for(&self.default_model)).map_err(|e| {
            GatewayError::configuration(format!(
                "provider '{}': invalid endpoint '{}': {e}",
                self.name, self.endpoint
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::configuration(format!(
                "provider '{}': endpoint scheme must be http or https",
                self.name
            )));
        }

        Ok(())
    }
}

/// One backend: a descriptor plus the logic that speaks its wire format.
///
/// Both operations are pure. `build_request` is total over a validated descriptor and
/// `extract_text` returns an empty string whenever the expected field is missing, so
/// callers can treat "no text" uniformly as a content-level failure.
pub trait ProviderAdapter: Send + Sync {
    /// The provider's descriptor
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Build the provider-specific wire request
    fn build_request(&self, request: &GenerationRequest, credential: &SecretString) -> WireRequest;

    /// Extract completion text from a raw response body
    fn extract_text(&self, body: &str) -> String;

    /// Provider display name
    fn name(&self) -> &str {
        &self.descriptor().name
    }
}
