//! Optional summarization collaborator.
//!
//! Treated as an opaque text-in/text-out service: when enabled it replaces
//! the raw transcript with a summary before the result is stored, and a
//! failure fails the job.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SUMMARY_PROMPT: &str =
    "Summarize the following meeting transcript into concise notes. \
     Keep key decisions and action items.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Summarizes through a chat-completions style HTTP API.
pub struct ChatSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatSummarizer {
    pub fn new(endpoint: Option<String>, api_key: String, model: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!(
            "Initialized summarizer with endpoint {} and model {}",
            endpoint, model
        );

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        info!(
            "Summarizing transcript via {} ({} chars in)",
            self.model,
            text.len()
        );

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SUMMARY_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send summarization request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read summarization response")?;

        if !status.is_success() {
            bail!(
                "Summarization request failed with status {}: {}",
                status,
                response_text
            );
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to parse summarization response")?;

        let summary = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .context("Summarization response contained no choices")?;

        info!("Summary ready: {} chars", summary.len());
        Ok(summary)
    }
}
