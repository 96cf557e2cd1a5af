//! Test fixtures: descriptors, credentials and requests

use gateway_core::{ApiStyle, GenerationRequest, ProviderDescriptor, StaticCredentialStore};

/// Credential key used for a provider name
pub fn key_for(name: &str) -> String {
    format!("{}_API_KEY", name.to_uppercase())
}

/// Secret value used for a provider name
pub fn secret_for(name: &str) -> String {
    format!("sk-{name}-secret")
}

/// Chat-completions provider served from `base_url`
pub fn chat_provider(base_url: &str, name: &str, priority: u32) -> ProviderDescriptor {
    ProviderDescriptor::new(
        name,
        format!("{base_url}/{name}/v1/chat/completions"),
        key_for(name),
        format!("{name}-model"),
    )
    .with_priority(priority)
}

/// Generate-content provider served from `base_url`
pub fn generate_content_provider(base_url: &str, name: &str, priority: u32) -> ProviderDescriptor {
    ProviderDescriptor::new(
        name,
        format!("{base_url}/{name}/v1beta/models/{{model}}:generateContent"),
        key_for(name),
        format!("{name}-flash"),
    )
    .with_api_style(ApiStyle::GenerateContent)
    .with_priority(priority)
}

/// Credentials for the named providers only
pub fn credentials_for(names: &[&str]) -> StaticCredentialStore {
    names.iter().fold(StaticCredentialStore::new(), |store, name| {
        store.with_secret(key_for(name), secret_for(name))
    })
}

/// A typical request
pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new(
        "You are an assistant that writes concise summaries.",
        "Summarize: the quarterly report shows steady growth.",
        256,
    )
}
