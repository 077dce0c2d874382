//! Webhook handshake core: payload model, session state, orchestrator.

pub mod event;
pub mod machine;
pub mod status;

pub use event::WebhookEvent;
pub use machine::{RelayMachine, WebhookOutcome};
pub use status::{HandshakePhase, RelayStatusHandle};
