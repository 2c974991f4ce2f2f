use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{DEFAULT_BASE_URL, ModelId};

/// Command-line surface. Exactly one of `--prompt` / `--file` must be given;
/// temperature and model are validated here so no request is ever built from
/// invalid values.
#[derive(Debug, Parser)]
#[command(name = "pling", version, about = "Send a single prompt to a chat-completion endpoint and print the reply", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["prompt", "file"])))]
pub struct Cli {
    /// API key sent as a bearer token
    #[arg(long, value_name = "KEY")]
    pub api_key: String,

    /// Target model
    #[arg(long, value_parser = parse_model)]
    pub model: ModelId,

    /// Literal prompt text
    #[arg(long)]
    pub prompt: Option<String>,

    /// Read the prompt from a UTF-8 text file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Maximum number of tokens to generate
    #[arg(long, default_value_t = 1024)]
    pub max_tokens: u32,

    /// Sampling temperature, between 0.0 and 1.0
    #[arg(long, default_value_t = 0.7, value_parser = parse_temperature, allow_negative_numbers = true)]
    pub temperature: f32,

    /// Whole-request timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Completion endpoint base URL
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,
}

fn parse_model(raw: &str) -> Result<ModelId, String> {
    ModelId::from_str(raw)
}

fn parse_temperature(raw: &str) -> Result<f32, String> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| String::from("must be a number between 0.0 and 1.0"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(String::from("must be between 0.0 and 1.0"))
    }
}
