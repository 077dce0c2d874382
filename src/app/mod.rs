use crate::api::{ApiServer, AppState};
use crate::broadcast::{Broadcaster, HttpDirectory, HttpMailer};
use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::relay::{RelayMachine, RelayStatusHandle};
use crate::store::ResultStore;
use crate::summarize::{ChatSummarizer, Summarizer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting relaynote service");

    let config = Config::load()?;

    let store = Arc::new(ResultStore::at_default_location()?);
    let status = RelayStatusHandle::default();

    let machine = RelayMachine::new(
        Box::new(HttpFetcher::new()),
        build_summarizer(&config)?,
        store.clone(),
        status.clone(),
    );

    if config.directory.endpoint.is_empty() {
        warn!("directory.endpoint is not configured; /share will fail until it is set");
    }
    if config.mail.endpoint.is_empty() {
        warn!("mail.endpoint is not configured; broadcast sends will fail until it is set");
    }

    let broadcaster = Arc::new(Broadcaster::new(
        Box::new(HttpDirectory::new(
            config.directory.endpoint.clone(),
            config.directory.api_key.clone(),
        )),
        Box::new(HttpMailer::new(config.mail.clone())),
        config.mail.subject.clone(),
        config.broadcast.send_delay_ms,
    ));

    let state = AppState {
        machine: Arc::new(Mutex::new(machine)),
        status,
        store,
        broadcaster,
    };

    info!("Relaynote is ready!");

    ApiServer::new(config.server.port, state).start().await
}

fn build_summarizer(config: &Config) -> Result<Option<Box<dyn Summarizer>>> {
    if !config.summarizer.enabled {
        return Ok(None);
    }

    let api_key = config
        .summarizer
        .api_key
        .clone()
        .context("summarizer.api_key is required when the summarizer is enabled")?;

    Ok(Some(Box::new(ChatSummarizer::new(
        config.summarizer.endpoint.clone(),
        api_key,
        config.summarizer.model.clone(),
    ))))
}
