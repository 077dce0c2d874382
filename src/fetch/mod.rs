//! Transcript retrieval from the upstream service.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Retrieves the transcript text behind `url`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TranscriptDocument {
    #[serde(default)]
    text: Option<String>,
}

/// Extracts the `text` field of a transcript document. A document without
/// one yields the upstream placeholder.
fn extract_text(body: &str) -> Result<String> {
    let document: TranscriptDocument =
        serde_json::from_str(body).context("Failed to parse transcript document")?;
    Ok(document.text.unwrap_or_else(|| "(no text)".to_string()))
}

/// Downloads transcript documents over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Downloading transcript from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to download transcript")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read transcript response")?;

        if !status.is_success() {
            bail!(
                "Transcript download failed with status {}: {}",
                status,
                body
            );
        }

        let text = extract_text(&body)?;
        debug!("Transcript text: {} chars", text.len());

        Ok(text)
    }
}
