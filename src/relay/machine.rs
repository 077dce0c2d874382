//! Webhook handshake orchestrator.
//!
//! The upstream service fires two notifications per logical job: an
//! intermediate one and a final one carrying the usable artifact. The machine
//! suppresses the first arrival and runs the produce-store pipeline on the
//! second. Collaborators are injected via constructor.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::fetch::TranscriptFetcher;
use crate::store::{ResultRecord, ResultStore};
use crate::summarize::Summarizer;

use super::event::{SummaryBlock, WebhookEvent};
use super::status::RelayStatusHandle;

/// Outcome of a single webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// First event of a pair; nothing was fetched or written.
    AwaitingSecond,
    /// Second event processed and the result stored.
    Completed,
}

pub struct RelayMachine {
    fetcher: Box<dyn TranscriptFetcher>,
    summarizer: Option<Box<dyn Summarizer>>,
    store: Arc<ResultStore>,
    status: RelayStatusHandle,
}

impl RelayMachine {
    pub fn new(
        fetcher: Box<dyn TranscriptFetcher>,
        summarizer: Option<Box<dyn Summarizer>>,
        store: Arc<ResultStore>,
        status: RelayStatusHandle,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            store,
            status,
        }
    }

    /// Handles one webhook delivery end to end.
    ///
    /// Callers serialize deliveries by holding the machine behind a mutex:
    /// the arrival count and the produce-store sequence must not interleave
    /// with another delivery.
    pub async fn handle_event(&self, event: WebhookEvent) -> Result<WebhookOutcome> {
        if !self.status.advance().await {
            info!("First webhook of pair received, waiting for the final notification");
            return Ok(WebhookOutcome::AwaitingSecond);
        }

        let result = async {
            let record = self.produce_record(&event).await?;
            self.store.put(&record).await?;
            Ok::<ResultRecord, anyhow::Error>(record)
        }
        .await;

        match result {
            Ok(record) => {
                self.status.open_ready().await;
                if record.is_error() {
                    info!("Job finished with degraded record: {}", record.body_text());
                } else {
                    info!("Job complete: {} chars stored", record.body_text().len());
                }
                Ok(WebhookOutcome::Completed)
            }
            Err(e) => {
                warn!("Webhook job failed: {:#}", e);
                self.status.set_error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Builds the record for a completing event. Priority matches the
    /// upstream payloads: chapter summary first, then transcript URL, then a
    /// degraded error record.
    async fn produce_record(&self, event: &WebhookEvent) -> Result<ResultRecord> {
        if let Some(raw) = event.summary_text() {
            let summary = SummaryBlock::parse(raw)?;
            info!("Summary block found: {} chapters", summary.chapters.len());
            return Ok(ResultRecord::transcript(summary.digest()));
        }

        if let Some(url) = event.transcript_url() {
            info!("No summary in payload, downloading transcript from {}", url);
            let mut text = self.fetcher.fetch_text(url).await?;

            if let Some(summarizer) = &self.summarizer {
                text = summarizer.summarize(&text).await?;
            }

            return Ok(ResultRecord::transcript(text));
        }

        info!("Webhook carried neither summary nor transcript URL");
        Ok(ResultRecord::error("No transcript found."))
    }
}
