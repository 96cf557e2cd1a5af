//! OpenAI-compatible chat completions adapter.
//!
//! Used for managed AI gateways and aggregators (OpenRouter and similar).
//!
//! # API Format
//! - Request: `{model, messages: [{role: "system"}, {role: "user"}], max_tokens,
//!   response_format?, temperature?}`
//! - Response text: `choices[0].message.content`
//! - Auth: `Authorization: Bearer <key>` unless the descriptor says otherwise

use crate::auth::authorize;
use gateway_core::{GenerationRequest, ProviderAdapter, ProviderDescriptor, WireRequest};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

/// Chat completions provider
#[derive(Debug, Clone)]
pub struct ChatCompletionsAdapter {
    descriptor: ProviderDescriptor,
}

impl ChatCompletionsAdapter {
    /// Create an adapter for the descriptor
    #[must_use]
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self { descriptor }
    }

    /// Build the JSON body for a request
    fn build_body(model: &str, request: &GenerationRequest) -> Value {
        let mut body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
            "max_tokens": request.max_output_tokens,
        });

        if request.json_response {
            body["response_format"] = json!({ "type": "json_object" });
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    /// Flatten message content: plain string, or an array of text parts
    fn content_text(content: &Value) -> String {
        match content {
            Value::String(text) => text.clone(),
            Value::Array(parts) => parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(""),
            _ => String::new(),
        }
    }
}

impl ProviderAdapter for ChatCompletionsAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn build_request(&self, request: &GenerationRequest, credential: &SecretString) -> WireRequest {
        let model = self.descriptor.model_for(request.quality_hint);
        let url = self.descriptor.endpoint_for(model);
        let body = Self::build_body(model, request);

        let mut wire = WireRequest::new(url, body, model);
        for (name, value) in &self.descriptor.extra_headers {
            wire = wire.with_header(name, value);
        }

        authorize(wire, &self.descriptor.auth_scheme(), credential)
    }

    fn extract_text(&self, body: &str) -> String {
        match serde_json::from_str::<ChatCompletionsResponse>(body) {
            Ok(response) => response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .map(|message| Self::content_text(&message.content))
                .unwrap_or_default(),
            Err(e) => {
                trace!(provider = %self.descriptor.name, error = %e, "Unparsable chat completions body");
                String::new()
            }
        }
    }
}

// Chat completions API types

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Value,
}
