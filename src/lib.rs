pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod output;
pub mod providers;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::process::ExitCode;
use tracing::info;

use cli::Cli;
use config::Config;

/// Runs the whole pipeline: resolve input, send one completion request,
/// present the result. Returns the process exit code for recovered failures;
/// fatal pre-network errors (unreadable prompt file, client construction)
/// come back as `Err` for `main` to report.
pub async fn run() -> Result<ExitCode> {
    let args = Cli::parse();
    let cfg = Config::from_cli(&args);
    let prompt = input::resolve_prompt(args.prompt, args.file.as_deref())?;

    let client = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;
    info!(
        model = %cfg.model,
        base_url = %cfg.base_url,
        max_tokens = cfg.max_tokens,
        temperature = cfg.temperature,
        timeout_secs = cfg.timeout_secs,
        "loaded runtime configuration"
    );

    match providers::anthropic::complete(&client, &cfg, &prompt).await {
        Ok(text) => {
            output::print_completion(&text);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err:#}");
            eprintln!("No response received");
            Ok(ExitCode::FAILURE)
        }
    }
}
