//! Google Gemini generate-content adapter.
//!
//! # API Format
//! - Endpoint: `https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent`
//! - Request: `{contents: [{parts: [{text}]}], generationConfig: {response_mime_type?,
//!   maxOutputTokens, temperature?}}`; system and user prompts are joined into a
//!   single text part separated by a blank line
//! - Response text: `candidates[0].content.parts[0].text`
//! - Auth: API key in the `key` query parameter unless the descriptor says otherwise

use crate::auth::authorize;
use gateway_core::{GenerationRequest, ProviderAdapter, ProviderDescriptor, WireRequest};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

/// Separator between system and user prompt in the single content blob
const PROMPT_SEPARATOR: &str = "\n\n";

/// Generate-content provider
#[derive(Debug, Clone)]
pub struct GenerateContentAdapter {
    descriptor: ProviderDescriptor,
}

impl GenerateContentAdapter {
    /// Create an adapter for the descriptor
    #[must_use]
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self { descriptor }
    }

    /// Build the JSON body for a request
    fn build_body(request: &GenerationRequest) -> Value {
        let text = format!(
            "{}{PROMPT_SEPARATOR}{}",
            request.system_prompt, request.user_prompt
        );

        let mut generation_config = json!({
            "maxOutputTokens": request.max_output_tokens,
        });
        if request.json_response {
            generation_config["response_mime_type"] = json!("application/json");
        }
        if let Some(temperature) = request.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": generation_config,
        })
    }
}

impl ProviderAdapter for GenerateContentAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn build_request(&self, request: &GenerationRequest, credential: &SecretString) -> WireRequest {
        let model = self.descriptor.model_for(request.quality_hint);
        let url = self.descriptor.endpoint_for(model);

        let mut wire = WireRequest::new(url, Self::build_body(request), model);
        for (name, value) in &self.descriptor.extra_headers {
            wire = wire.with_header(name, value);
        }

        authorize(wire, &self.descriptor.auth_scheme(), credential)
    }

    fn extract_text(&self, body: &str) -> String {
        match serde_json::from_str::<GenerateContentResponse>(body) {
            Ok(response) => response
                .candidates
                .into_iter()
                .next()
                .and_then(|candidate| candidate.content)
                .and_then(|content| content.parts.into_iter().next())
                .and_then(|part| part.text)
                .unwrap_or_default(),
            Err(e) => {
                trace!(provider = %self.descriptor.name, error = %e, "Unparsable generate-content body");
                String::new()
            }
        }
    }
}

// Generate-content API types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}
