//! Upstream webhook intake.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::api::AppState;
use crate::relay::{WebhookEvent, WebhookOutcome};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .with_state(state)
}

/// Receives one notification from the upstream service.
///
/// The first event of a pair is acknowledged without processing; the second
/// runs the fetch-store pipeline. Processing failures return 500 and the
/// operator re-triggers the pair manually.
async fn receive_webhook(
    State(state): State<AppState>,
    body: Option<Json<WebhookEvent>>,
) -> (StatusCode, Json<Value>) {
    let event = body.map(|Json(event)| event).unwrap_or_default();
    info!("Webhook received");

    let machine = state.machine.lock().await;
    match machine.handle_event(event).await {
        Ok(WebhookOutcome::AwaitingSecond) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Waiting for second webhook.",
            })),
        ),
        Ok(WebhookOutcome::Completed) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => {
            error!("Webhook processing failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}
