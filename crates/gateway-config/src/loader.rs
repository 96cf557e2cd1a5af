//! Config file discovery, parsing and environment overrides.

use crate::{ConfigError, GatewayConfig};
use humantime_serde::re::humantime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "GATEWAY_CONFIG";

/// Files tried, in order, when no path is given
const CANDIDATES: &[&str] = &["gateway.yaml", "gateway.toml", "config/gateway.yaml"];

/// Load configuration.
///
/// The file is taken from `explicit`, then `GATEWAY_CONFIG`, then the first existing
/// well-known candidate. Without a file the built-in defaults are used. Environment
/// overrides are applied and the result is validated.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, an override is malformed, or
/// the result fails validation
pub fn load_config(explicit: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) => read_file(&path)?,
        None => {
            debug!("No config file found, using built-in defaults");
            GatewayConfig::default()
        }
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    config.ensure_valid()?;
    Ok(config)
}

/// Path `load_config` reads for `explicit`, or `None` when it falls back to the
/// built-in defaults
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    resolve_in(explicit, env_path, Path::new(""))
}

fn resolve_in(explicit: Option<&Path>, env_path: Option<PathBuf>, dir: &Path) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or(env_path).or_else(|| {
        CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|candidate| candidate.is_file())
    })
}

/// Load and validate a specific file, with environment overrides applied
///
/// # Errors
/// Returns error if the file cannot be read or parsed or fails validation
pub fn load_from_path(path: &Path) -> Result<GatewayConfig, ConfigError> {
    load_config(Some(path))
}

fn read_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("yaml" | "yml") => GatewayConfig::from_yaml_str(&content)?,
        Some("toml") => GatewayConfig::from_toml_str(&content)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(path = %path.display(), providers = config.providers.len(), "Loaded configuration");
    Ok(config)
}

/// Overlay `GATEWAY_*` variables read through `lookup`
///
/// # Errors
/// Returns error if a set variable cannot be parsed
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("GATEWAY_MAX_ATTEMPTS") {
        config.retry.max_attempts =
            value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidOverride {
                    var: "GATEWAY_MAX_ATTEMPTS".to_string(),
                    message: e.to_string(),
                })?;
    }

    if let Some(value) = lookup("GATEWAY_BASE_DELAY") {
        config.retry.base_delay = parse_duration("GATEWAY_BASE_DELAY", &value)?;
    }

    if let Some(value) = lookup("GATEWAY_REQUEST_TIMEOUT") {
        config.http.request_timeout = parse_duration("GATEWAY_REQUEST_TIMEOUT", &value)?;
    }

    if let Some(value) = lookup("GATEWAY_LOG_LEVEL") {
        config.logging.level = value.trim().to_string();
    }

    if let Some(value) = lookup("GATEWAY_LOG_JSON") {
        config.logging.json = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(ConfigError::InvalidOverride {
                    var: "GATEWAY_LOG_JSON".to_string(),
                    message: format!("expected a boolean, got '{other}'"),
                })
            }
        };
    }

    Ok(())
}

fn parse_duration(var: &str, value: &str) -> Result<std::time::Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidOverride {
        var: var.to_string(),
        message: e.to_string(),
    })
}
