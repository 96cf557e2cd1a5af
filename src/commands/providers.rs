//! Providers command - show the provider chain.

use anyhow::Result;
use gateway_config::GatewayConfig;
use gateway_core::EnvCredentialStore;
use serde::Serialize;
use std::process::ExitCode;
use tabled::Tabled;

use crate::output::{self, OutputFormat};

/// One row of the provider listing.
#[derive(Debug, Serialize, Tabled)]
pub struct ProviderRow {
    #[tabled(rename = "Priority")]
    pub priority: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "API")]
    pub api_style: String,
    #[tabled(rename = "Model")]
    pub default_model: String,
    #[tabled(rename = "Premium")]
    pub premium_model: String,
    #[tabled(rename = "Credential")]
    pub credential_key: String,
    #[tabled(rename = "Present")]
    pub credential_present: bool,
}

/// Execute the providers command.
pub fn execute(config: &GatewayConfig, json: bool) -> Result<ExitCode> {
    let credentials = EnvCredentialStore::new();

    let rows: Vec<ProviderRow> = config
        .descriptors()
        .into_iter()
        .map(|d| ProviderRow {
            priority: d.priority,
            credential_present: credentials.is_present(&d.credential_key),
            api_style: d.api_style.as_str().to_string(),
            premium_model: d.premium_model.clone().unwrap_or_else(|| "-".to_string()),
            name: d.name,
            default_model: d.default_model,
            credential_key: d.credential_key,
        })
        .collect();

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => output::json(&rows)?,
        OutputFormat::Text => output::table(&rows),
    }

    Ok(ExitCode::SUCCESS)
}
