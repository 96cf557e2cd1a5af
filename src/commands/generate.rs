//! Generate command - run one generation through the provider chain.

use anyhow::{bail, Context, Result};
use clap::Args;
use gateway_config::GatewayConfig;
use gateway_core::{GatewayError, GenerationRequest, QualityHint};
use gateway_routing::{CancellationToken, GenerationGatewayBuilder};
use gateway_telemetry::GatewayMetrics;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

use crate::output::{self, OutputFormat};

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// System prompt
    #[arg(short, long, conflicts_with = "system_file")]
    pub system: Option<String>,

    /// Read the system prompt from a file
    #[arg(long)]
    pub system_file: Option<PathBuf>,

    /// User prompt; read from stdin when neither --user nor --user-file is given
    #[arg(short, long, conflicts_with = "user_file")]
    pub user: Option<String>,

    /// Read the user prompt from a file
    #[arg(long)]
    pub user_file: Option<PathBuf>,

    /// Maximum output tokens
    #[arg(short = 'm', long, default_value_t = 1024)]
    pub max_tokens: u32,

    /// Model tier: fast or premium
    #[arg(short, long)]
    pub quality: Option<QualityHint>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Ask providers for a JSON response
    #[arg(long)]
    pub json_response: bool,

    /// Print Prometheus metrics to stderr after the run
    #[arg(long)]
    pub print_metrics: bool,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &GatewayConfig, json: bool) -> Result<ExitCode> {
    let format = OutputFormat::from_json_flag(json);
    let request = build_request(&args)?;

    let metrics = GatewayMetrics::new()?;
    let gateway = GenerationGatewayBuilder::from_config(config)?
        .metrics(metrics.clone())
        .build()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling generation");
            on_interrupt.cancel();
        }
    });

    let outcome = gateway.generate_with_cancellation(request, &cancel).await;

    if args.print_metrics {
        eprint!("{}", metrics.render()?);
    }

    match outcome {
        Ok(result) => {
            match format {
                OutputFormat::Json => output::json(&result)?,
                OutputFormat::Text => {
                    println!("{}", result.text);
                    output::detail("provider", &result.provider_name);
                    output::detail("model", &result.model_used);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            report_error(&error, format)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report_error(error: &GatewayError, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output::json(&error.to_body())?,
        OutputFormat::Text => {
            output::error(&error.to_string());
            if let GatewayError::AllProvidersExhausted { failures, .. } = error {
                for failure in failures {
                    output::detail(&failure.provider, &serde_json::to_string(&failure.reason)?);
                }
            }
        }
    }
    Ok(())
}

fn build_request(args: &GenerateArgs) -> Result<GenerationRequest> {
    let system = match (&args.system, &args.system_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => bail!("a system prompt is required (--system or --system-file)"),
    };

    let user = match (&args.user, &args.user_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => read_stdin()?,
    };

    let mut request = GenerationRequest::new(system, user, args.max_tokens)
        .with_json_response(args.json_response);
    request.quality_hint = args.quality;
    request.temperature = args.temperature;
    Ok(request)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("a user prompt is required (--user, --user-file, or stdin)");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("failed to read user prompt from stdin")?;
    Ok(buffer)
}
