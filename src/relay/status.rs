//! Handshake and readiness state shared between the machine and API handlers.
//!
//! The state lives in a session handle rather than module globals so that
//! independent instances (and test runs) never share it.

use std::sync::Arc;
use tokio::sync::Mutex;

/// Phase of the two-webhook handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    /// No event seen for the current logical job.
    Idle,
    /// One event seen; the next one carries the usable artifact.
    AwaitingSecond,
}

impl HandshakePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingSecond => "awaiting_second",
        }
    }
}

/// Current relay session state.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub phase: HandshakePhase,
    /// True only between a successful store write and its first retrieval.
    pub ready: bool,
    pub last_error: Option<String>,
}

impl Default for RelayState {
    fn default() -> Self {
        Self {
            phase: HandshakePhase::Idle,
            ready: false,
            last_error: None,
        }
    }
}

/// Thread-safe handle over the relay session state.
#[derive(Clone, Default)]
pub struct RelayStatusHandle {
    inner: Arc<Mutex<RelayState>>,
}

impl RelayStatusHandle {
    pub async fn get(&self) -> RelayState {
        self.inner.lock().await.clone()
    }

    /// Records one webhook arrival and returns true when this event completes
    /// a pair. The phase always returns to idle on the completing event, so a
    /// failed job can be re-triggered with a fresh pair.
    pub async fn advance(&self) -> bool {
        let mut state = self.inner.lock().await;
        match state.phase {
            HandshakePhase::Idle => {
                state.phase = HandshakePhase::AwaitingSecond;
                false
            }
            HandshakePhase::AwaitingSecond => {
                state.phase = HandshakePhase::Idle;
                true
            }
        }
    }

    /// Opens the readiness gate. Idempotent.
    pub async fn open_ready(&self) {
        let mut state = self.inner.lock().await;
        state.ready = true;
        state.last_error = None;
    }

    /// Check-and-clear in a single lock scope: returns true exactly once per
    /// `open_ready`, so two retrievals cannot both observe the gate open.
    pub async fn try_consume(&self) -> bool {
        let mut state = self.inner.lock().await;
        if state.ready {
            state.ready = false;
            true
        } else {
            false
        }
    }

    pub async fn set_error(&self, error: String) {
        let mut state = self.inner.lock().await;
        state.last_error = Some(error);
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        *state = RelayState::default();
    }
}
