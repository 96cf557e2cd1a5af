//! Configuration errors.

use std::path::PathBuf;

/// Configuration loading or validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither YAML nor TOML
    #[error("Unsupported config format for {0} (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    /// The document could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// The document parsed but is not a usable configuration
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// An environment override holds an unusable value
    #[error("Invalid value for {var}: {message}")]
    InvalidOverride {
        /// Variable name
        var: String,
        /// What was wrong
        message: String,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(e.to_string())
    }
}
