//! Broadcast endpoints.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::broadcast::BroadcastError;

/// Request body for POST /share. When `text` is absent the stored record is
/// broadcast instead, same as GET.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ShareRequest {
    pub text: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/share", get(share_stored).post(share_with_text))
        .with_state(state)
}

async fn share_stored(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let record = state
        .store
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("No data yet."))?;

    run_broadcast(&state, record.body_text()).await
}

async fn share_with_text(
    State(state): State<AppState>,
    body: Option<Json<ShareRequest>>,
) -> ApiResult<Json<Value>> {
    let text = body
        .and_then(|Json(req)| req.text)
        .filter(|text| !text.trim().is_empty());

    match text {
        Some(text) => run_broadcast(&state, &text).await,
        None => share_stored(State(state)).await,
    }
}

async fn run_broadcast(state: &AppState, text: &str) -> ApiResult<Json<Value>> {
    info!("Broadcast requested");

    match state.broadcaster.broadcast(text).await {
        Ok(report) => Ok(Json(json!({
            "success": true,
            "message": format!(
                "Broadcast attempted for {} recipients ({} failed).",
                report.attempted, report.failed
            ),
        }))),
        Err(BroadcastError::NoRecipients) => Err(ApiError::not_found("No recipients found.")),
        Err(BroadcastError::Directory(e)) => {
            error!("Failed to list recipients: {:#}", e);
            Err(ApiError::internal(format!(
                "Failed to list recipients: {}",
                e
            )))
        }
    }
}
