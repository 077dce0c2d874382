//! Readiness-gated retrieval of the latest result.

use axum::{extract::State, response::Json, routing::get, Router};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::store::ResultRecord;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/latest", get(latest))
        .with_state(state)
}

/// Returns the stored record exactly once per completed job.
///
/// The readiness check-and-clear happens in one lock scope, so a second
/// request cannot observe the gate open again until the next job completes.
async fn latest(State(state): State<AppState>) -> ApiResult<Json<ResultRecord>> {
    if !state.status.try_consume().await {
        return Err(ApiError::forbidden("Data is not ready yet."));
    }

    match state.store.get().await {
        Ok(Some(record)) => {
            info!("Latest result retrieved, readiness gate closed");
            Ok(Json(record))
        }
        Ok(None) => Err(ApiError::not_found("No data yet.")),
        Err(e) => {
            // The record is still on disk; reopen the gate so retrieval can
            // be retried once the file is repaired.
            warn!("Failed to read stored result: {:#}", e);
            state.status.open_ready().await;
            Err(ApiError::internal(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::broadcast::{Broadcaster, HttpDirectory, HttpMailer};
    use crate::config::MailConfig;
    use crate::fetch::HttpFetcher;
    use crate::relay::{RelayMachine, RelayStatusHandle};
    use crate::store::ResultStore;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn state_with_store(store: ResultStore) -> AppState {
        let store = Arc::new(store);
        let status = RelayStatusHandle::default();
        let machine = RelayMachine::new(
            Box::new(HttpFetcher::new()),
            None,
            store.clone(),
            status.clone(),
        );
        let broadcaster = Arc::new(Broadcaster::new(
            Box::new(HttpDirectory::new(String::new(), None)),
            Box::new(HttpMailer::new(MailConfig::default())),
            "Notes".to_string(),
            0,
        ));

        AppState {
            machine: Arc::new(Mutex::new(machine)),
            status,
            store,
            broadcaster,
        }
    }

    #[tokio::test]
    async fn test_closed_gate_rejects_retrieval() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_store(ResultStore::new(dir.path().join("latest.json")));

        assert!(latest(State(state)).await.is_err());
    }

    #[tokio::test]
    async fn test_record_is_returned_once_then_gate_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.json");
        std::fs::write(&path, r#"{"transcript":"hello"}"#).unwrap();

        let state = state_with_store(ResultStore::new(path));
        state.status.open_ready().await;

        let record = latest(State(state.clone())).await.unwrap();
        assert_eq!(record.0, ResultRecord::transcript("hello"));

        assert!(latest(State(state)).await.is_err());
    }

    #[tokio::test]
    async fn test_read_failure_reopens_the_gate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.json");
        std::fs::write(&path, "{ torn").unwrap();

        let state = state_with_store(ResultStore::new(path.clone()));
        state.status.open_ready().await;

        assert!(latest(State(state.clone())).await.is_err());
        assert!(state.status.get().await.ready);

        // Once the file is repaired the record is retrievable again.
        std::fs::write(&path, r#"{"transcript":"hello"}"#).unwrap();
        let record = latest(State(state.clone())).await.unwrap();
        assert_eq!(record.0, ResultRecord::transcript("hello"));
        assert!(!state.status.get().await.ready);
    }

    #[tokio::test]
    async fn test_open_gate_with_empty_store_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_store(ResultStore::new(dir.path().join("latest.json")));
        state.status.open_ready().await;

        assert!(latest(State(state.clone())).await.is_err());
        // The gate stays consumed; nothing was ever persisted.
        assert!(!state.status.get().await.ready);
    }
}
