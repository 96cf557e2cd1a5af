//! # Gateway Providers
//!
//! Provider implementations for the generation gateway.
//!
//! Two wire styles cover the backends in use:
//! - Chat completions (OpenAI-compatible gateways and aggregators such as OpenRouter),
//!   bearer-token auth
//! - Generate content (Google Gemini direct), API key in the query string
//!
//! The [`ProviderRegistry`] keeps adapters ordered by priority, and
//! [`ReqwestTransport`] issues the wire requests with a bounded timeout.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
pub mod chat_completions;
pub mod generate_content;
pub mod registry;
pub mod transport;

// Re-export main types
pub use chat_completions::ChatCompletionsAdapter;
pub use generate_content::GenerateContentAdapter;
pub use registry::{adapter_for, ProviderRegistry};
pub use transport::ReqwestTransport;
