//! HTTP client for a running relaynote service.

use anyhow::{bail, Context, Result};
use serde_json::json;

pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Retrieves the latest result. Consumes the readiness gate on the
    /// service side, so a second call reports "not ready".
    pub async fn latest(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/latest", self.base_url))
            .send()
            .await
            .context("Failed to reach relaynote service")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read service response")?;

        match status.as_u16() {
            200 => Ok(body),
            403 => bail!("Data is not ready yet."),
            404 => bail!("No data yet."),
            _ => bail!("Unexpected response {}: {}", status, body),
        }
    }

    /// Triggers a broadcast of the stored result, or of `text` when given.
    pub async fn share(&self, text: Option<String>) -> Result<String> {
        let url = format!("{}/share", self.base_url);
        let request = match text {
            Some(text) => self.client.post(&url).json(&json!({ "text": text })),
            None => self.client.get(&url),
        };

        let response = request
            .send()
            .await
            .context("Failed to reach relaynote service")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read service response")?;

        if !status.is_success() {
            bail!("Broadcast failed ({}): {}", status, body);
        }

        Ok(body)
    }
}
