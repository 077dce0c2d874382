//! Recipient broadcaster: fans the stored result out as individual mails.
//!
//! The recipient list comes from an external directory store (read-only) and
//! delivery goes through an external mail provider, both behind trait seams.
//! Sends are strictly sequential with a fixed pause between them to respect
//! the provider rate limit.

pub mod directory;
pub mod mailer;

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub use directory::{HttpDirectory, RecipientDirectory};
pub use mailer::{HttpMailer, Mailer, OutboundMessage};

use serde::{Deserialize, Serialize};

/// A directory entry that may receive broadcast mail. Owned and mutated by
/// the external store; read-only here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// How a completed broadcast run went. Per-recipient failures do not make
/// the run itself a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Hard failures that abort a broadcast before any send is attempted.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("No recipients found.")]
    NoRecipients,
    #[error("Failed to list recipients: {0}")]
    Directory(anyhow::Error),
}

pub struct Broadcaster {
    directory: Box<dyn RecipientDirectory>,
    mailer: Box<dyn Mailer>,
    subject: String,
    send_delay: Duration,
}

impl Broadcaster {
    pub fn new(
        directory: Box<dyn RecipientDirectory>,
        mailer: Box<dyn Mailer>,
        subject: String,
        send_delay_ms: u64,
    ) -> Self {
        Self {
            directory,
            mailer,
            subject,
            send_delay: Duration::from_millis(send_delay_ms),
        }
    }

    /// Attempts every listed recipient with a non-empty address. Individual
    /// send failures are logged and skipped; the run reports success once
    /// every recipient has been attempted.
    pub async fn broadcast(&self, text: &str) -> Result<BroadcastReport, BroadcastError> {
        let recipients = self
            .directory
            .list()
            .await
            .map_err(BroadcastError::Directory)?;

        let recipients: Vec<Recipient> = recipients
            .into_iter()
            .filter(|r| !r.email.trim().is_empty())
            .collect();

        if recipients.is_empty() {
            return Err(BroadcastError::NoRecipients);
        }

        info!("Broadcasting result to {} recipients", recipients.len());

        let total = recipients.len();
        let mut failed = 0;
        for (i, recipient) in recipients.iter().enumerate() {
            let message = OutboundMessage {
                to: recipient.email.clone(),
                subject: self.subject.clone(),
                body: text.to_string(),
            };

            if let Err(e) = self.mailer.send(&message).await {
                warn!("Failed to send to {}: {:#}", recipient.email, e);
                failed += 1;
            }

            if i + 1 < total {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        info!("Broadcast finished: {} attempted, {} failed", total, failed);

        Ok(BroadcastReport {
            attempted: total,
            failed,
        })
    }
}
