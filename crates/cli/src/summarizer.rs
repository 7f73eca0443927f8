//! Downstream summarization client.
//!
//! Posts a completed chunk's raw text as a single prompt to a
//! messages-style model endpoint and returns the free-text reply. Strictly
//! downstream of the resolver: the chunk artifact is finished before any
//! request goes out, and the reply is never parsed, only stored.
//!
//! Two layers of robustness: transient transport and server errors are
//! retried with backoff, and replies that look truncated (length-capped
//! stop reason, unbalanced code fence) are extended with follow-up
//! "continue" requests up to a fixed cap.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Environment variable holding the endpoint API key.
pub const API_KEY_ENV: &str = "CHUNKSTREAM_API_KEY";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_ATTEMPTS: u32 = 3;
const MAX_CONTINUATIONS: usize = 10;
const CONTINUE_PROMPT: &str = "Continue exactly where you left off.";

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

pub struct SummarizerClient {
    client: reqwest::Client,
    config: SummarizerConfig,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

impl Message {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl SummarizerClient {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building summarizer HTTP client")?;
        Ok(Self { client, config })
    }

    /// Send `prompt` and return the model's reply, following up with
    /// continuation requests while the reply looks truncated.
    pub async fn summarize(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        let opening = [Message::user(prompt)];
        let (mut combined, mut stop_reason) = self.send(&opening, system).await?;

        let mut continuations = 0;
        while looks_truncated(stop_reason.as_deref(), &combined) {
            if continuations == MAX_CONTINUATIONS {
                log::warn!("Reached {MAX_CONTINUATIONS} continuations, keeping reply as is");
                break;
            }
            continuations += 1;
            log::info!("Reply looks truncated, continuation {continuations}/{MAX_CONTINUATIONS}");

            let follow_up = [
                Message::user(prompt),
                Message::assistant(combined.clone()),
                Message::user(CONTINUE_PROMPT),
            ];
            let (part, stop) = self.send(&follow_up, system).await?;
            combined.push_str(&part);
            stop_reason = stop;
        }

        Ok(combined)
    }

    /// One request with bounded retry. Transport failures, 429 and 5xx
    /// responses are retried with exponential backoff; other error
    /// statuses fail immediately.
    async fn send(
        &self,
        messages: &[Message],
        system: Option<&str>,
    ) -> Result<(String, Option<String>)> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages,
            system,
        };

        for attempt in 1..=MAX_ATTEMPTS {
            if attempt > 1 {
                tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
            }

            let response = match self
                .client
                .post(&self.config.endpoint)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    log::warn!("Summarizer request failed (attempt {attempt}/{MAX_ATTEMPTS}): {err}");
                    continue;
                }
            };

            let status = response.status();
            if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                log::warn!("Summarizer returned {status} (attempt {attempt}/{MAX_ATTEMPTS})");
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                bail!("summarizer endpoint returned {status}: {body}");
            }

            let parsed: MessagesResponse = response
                .json()
                .await
                .context("decoding summarizer response")?;
            let text: String = parsed
                .content
                .iter()
                .map(|block| block.text.as_str())
                .collect();
            return Ok((text, parsed.stop_reason));
        }

        bail!("summarizer endpoint unreachable after {MAX_ATTEMPTS} attempts")
    }
}

fn looks_truncated(stop_reason: Option<&str>, text: &str) -> bool {
    if stop_reason == Some("max_tokens") {
        return true;
    }
    // An odd number of fences means a code block was cut off mid-stream.
    text.matches("```").count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_tokens_stop_reason_is_truncated() {
        assert!(looks_truncated(Some("max_tokens"), "done"));
        assert!(!looks_truncated(Some("end_turn"), "done"));
        assert!(!looks_truncated(None, "done"));
    }

    #[test]
    fn unbalanced_code_fence_is_truncated() {
        assert!(looks_truncated(None, "```rust\nfn main() {"));
        assert!(!looks_truncated(None, "```rust\nfn main() {}\n```"));
    }
}
