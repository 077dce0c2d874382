//! HTTP surface of the relay.
//!
//! Endpoints:
//! - Liveness (GET /)
//! - Upstream webhook intake (POST /webhook)
//! - Readiness-gated retrieval of the latest result (GET /latest)
//! - Recipient broadcast (GET /share, POST /share)

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tracing::info;

use crate::broadcast::Broadcaster;
use crate::relay::{RelayMachine, RelayStatusHandle};
use crate::store::ResultStore;

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The machine is locked for the whole webhook path so two deliveries
    /// can never interleave between counting and acting.
    pub machine: Arc<Mutex<RelayMachine>>,
    pub status: RelayStatusHandle,
    pub store: Arc<ResultStore>,
    pub broadcaster: Arc<Broadcaster>,
}

pub struct ApiServer {
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(port: u16, state: AppState) -> Self {
        Self { port, state }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(liveness))
            .merge(routes::webhook::router(self.state.clone()))
            .merge(routes::latest::router(self.state.clone()))
            .merge(routes::share::router(self.state))
            .layer(ServiceBuilder::new());

        // Webhooks arrive from the public internet
        let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", self.port)).await?;

        info!("Relay listening on http://0.0.0.0:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /         - Liveness");
        info!("  POST /webhook  - Upstream webhook intake");
        info!("  GET  /latest   - Retrieve the latest result (consumes readiness)");
        info!("  GET  /share    - Broadcast the stored result to all recipients");
        info!("  POST /share    - Broadcast the given text to all recipients");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn liveness() -> &'static str {
    "Relaynote webhook relay is running"
}
