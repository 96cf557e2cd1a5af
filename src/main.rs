//! # Generation Gateway
//!
//! Command-line host for the resilient multi-provider generation gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Generate with the built-in provider chain
//! generation-gateway generate --system "You are concise." --user "Summarize this."
//!
//! # Read the user prompt from stdin, ask for JSON, use the premium tier
//! cat job.txt | generation-gateway generate --system-file system.txt --json-response --quality premium
//!
//! # Inspect the provider chain and which credentials are present
//! generation-gateway --config gateway.yaml providers
//! ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.execute().await
}
