//! Recipient directory backed by an external document store.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::Recipient;

#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Lists every recipient document. Read-only; the store owns the data.
    async fn list(&self) -> Result<Vec<Recipient>>;
}

#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    recipients: Vec<Recipient>,
}

/// Reads recipients from a REST document store.
pub struct HttpDirectory {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpDirectory {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl RecipientDirectory for HttpDirectory {
    async fn list(&self) -> Result<Vec<Recipient>> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Failed to query recipient directory")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read directory response")?;

        if !status.is_success() {
            bail!("Directory request failed with status {}: {}", status, body);
        }

        let parsed: DirectoryResponse =
            serde_json::from_str(&body).context("Failed to parse directory response")?;

        debug!("Directory returned {} recipients", parsed.recipients.len());
        Ok(parsed.recipients)
    }
}
