//! In-process event system for crew runs.
//!
//! The orchestrator publishes run and role lifecycle events here; the server
//! forwards them to browsers over SSE.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::{Event, EventEnvelope};
