//! CLI argument definitions using clap.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gateway_config::{load_config, GatewayConfig, LoggingConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::commands;

/// Generation Gateway - cascading fallback across text generation providers
#[derive(Parser, Debug)]
#[command(name = "generation-gateway")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (YAML or TOML); falls back to GATEWAY_CONFIG and well-known paths
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate text through the provider chain
    #[command(visible_alias = "gen")]
    Generate(commands::generate::GenerateArgs),

    /// List providers in priority order with credential presence
    Providers,

    /// Load and validate the configuration
    Validate,
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<ExitCode> {
        match self.command {
            Commands::Generate(args) => {
                let config = prepare(self.config.as_deref(), self.verbose, self.json)?;
                commands::generate::execute(args, &config, self.json).await
            }
            Commands::Providers => {
                let config = prepare(self.config.as_deref(), self.verbose, self.json)?;
                commands::providers::execute(&config, self.json)
            }
            Commands::Validate => commands::validate::execute(self.config.as_deref(), self.json),
        }
    }
}

/// Load configuration and start logging.
fn prepare(path: Option<&Path>, verbose: u8, json: bool) -> Result<GatewayConfig> {
    let config = load_config(path).context("failed to load configuration")?;
    init_logging(&config, verbose, json)?;
    Ok(config)
}

/// Initialize logging from config, raised by `-v` flags.
fn init_logging(config: &GatewayConfig, verbose: u8, json: bool) -> Result<()> {
    let level = match verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let logging = LoggingConfig::new(level)
        .with_json(json || config.logging.json)
        .with_target(verbose > 0 || config.logging.with_target);

    gateway_telemetry::init_logging(&logging).context("failed to initialize logging")
}
