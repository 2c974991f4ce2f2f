use std::fmt;
use std::str::FromStr;

use crate::cli::Cli;

pub const DEFAULT_BASE_URL: &str = "https://api.proxyapi.ru/anthropic/v1";

/// Models the backend accepts. Anything outside this list is rejected at
/// argument-parsing time, before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    Claude35Haiku,
    Claude35Sonnet,
    Claude37Sonnet,
}

impl ModelId {
    pub const ALL: [Self; 3] = [Self::Claude35Haiku, Self::Claude35Sonnet, Self::Claude37Sonnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude35Haiku => "claude-3-5-haiku-20241022",
            Self::Claude35Sonnet => "claude-3-5-sonnet-20241022",
            Self::Claude37Sonnet => "claude-3-7-sonnet-20250219",
        }
    }

    pub fn supported_list() -> String {
        Self::ALL.map(|model| model.as_str()).join(", ")
    }
}

impl FromStr for ModelId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == raw.trim())
            .ok_or_else(|| {
                format!(
                    "unknown model '{}'. Supported models: {}",
                    raw,
                    Self::supported_list()
                )
            })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable request-scoped settings, built once from the parsed command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model: ModelId,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            api_key: cli.api_key.clone(),
            model: cli.model,
            max_tokens: cli.max_tokens,
            temperature: cli.temperature,
            timeout_secs: cli.timeout,
        }
    }
}
