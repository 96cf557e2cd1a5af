//! Validate command - load and check the configuration.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::output::{self, OutputFormat};

/// Validation result.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute the validate command.
pub fn execute(path: Option<&Path>, json: bool) -> Result<ExitCode> {
    let file = gateway_config::resolve_config_path(path).map(|p| p.display().to_string());

    let result = match gateway_config::load_config(path) {
        Ok(config) => ValidationResult {
            valid: true,
            file,
            providers: Some(config.enabled_providers().count()),
            error: None,
        },
        Err(e) => ValidationResult {
            valid: false,
            file,
            providers: None,
            error: Some(e.to_string()),
        },
    };

    match OutputFormat::from_json_flag(json) {
        OutputFormat::Json => output::json(&result)?,
        OutputFormat::Text => {
            let source = result.file.as_deref().unwrap_or("built-in defaults");
            match (&result.error, result.providers) {
                (Some(error), _) => output::error(&format!("{source}: {error}")),
                (None, providers) => output::success(&format!(
                    "{source}: configuration is valid ({} enabled provider(s))",
                    providers.unwrap_or_default()
                )),
            }
        }
    }

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
