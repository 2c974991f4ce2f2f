use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers::http_errors::completion_request_error;

const SYSTEM_PROMPT: &str = "You are a helpful assistant";
const USER_AGENT: &str = concat!("pling/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    system: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Anthropic messages shape: `{"content": [{"text": "..."}]}`.
#[derive(Debug, Deserialize)]
struct ContentBody {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// OpenAI-compatible fallback shape: `{"choices": [{"message": {"content": "..."}}]}`.
#[derive(Debug, Deserialize)]
struct ChoicesBody {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn messages_url(base_url: &str) -> String {
    format!("{}/messages", base_url.trim_end_matches('/'))
}

fn build_request(cfg: &Config, prompt: &str) -> CompletionRequest {
    CompletionRequest {
        model: cfg.model.as_str().to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
        system: SYSTEM_PROMPT.to_string(),
    }
}

/// Extracts the completion text, trying the Anthropic shape first and the
/// choices shape second. An empty `content` list is a format error rather
/// than a reason to fall through: a body that carries `content` as a list
/// has committed to the first shape.
fn extract_text(body: Value) -> Result<String> {
    if body.get("content").is_some_and(Value::is_array) {
        let parsed: ContentBody = serde_json::from_value(body)
            .map_err(|err| anyhow!("invalid response format: {err}"))?;
        return parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| anyhow!("invalid response format: 'content' list is empty"));
    }

    let parsed: ChoicesBody = serde_json::from_value(body)
        .map_err(|err| anyhow!("invalid response format: {err}"))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("invalid response format: 'choices' list is empty"))
}

async fn http_status_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let url = response.url().to_string();
    let headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let response_body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read response body>".to_string());
    warn!(
        status = status.as_u16(),
        url = %url,
        response_body_len = response_body.len(),
        "endpoint returned non-success status"
    );

    let detail = serde_json::json!({
        "status": status.as_u16(),
        "url": url,
        "response": response_body,
        "headers": headers,
    });
    let rendered = serde_json::to_string_pretty(&detail)
        .unwrap_or_else(|_| format!("status {status} from {url}"));
    anyhow!("API error: {rendered}")
}

/// Sends one completion request and returns the extracted text. Every failure
/// is terminal for the invocation; there are no retries.
pub async fn complete(client: &Client, cfg: &Config, prompt: &str) -> Result<String> {
    let api_url = messages_url(&cfg.base_url);
    let body = build_request(cfg, prompt);
    debug!(
        api_url = %api_url,
        model = %cfg.model,
        prompt_len = prompt.len(),
        "sending completion request"
    );

    let response = client
        .post(&api_url)
        .bearer_auth(&cfg.api_key)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %cfg.model,
                error = %err,
                "completion request failed"
            );
            completion_request_error(err, &api_url, cfg.timeout_secs)
        })?;

    if !response.status().is_success() {
        return Err(http_status_error(response).await);
    }

    let decoded: Value = response
        .json()
        .await
        .context("Unexpected error: failed to decode response body as JSON")?;
    let text = extract_text(decoded).context("Unexpected error")?;
    debug!(
        model = %cfg.model,
        response_len = text.len(),
        "received completion response"
    );
    Ok(text)
}
