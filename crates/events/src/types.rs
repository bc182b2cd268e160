//! Event types emitted during a crew run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: Event,
}

impl EventEnvelope {
    /// Create a new event envelope with auto-generated ID and timestamp
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// All events a crew run can emit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fan-out run was started for a topic
    #[serde(rename = "run.started")]
    RunStarted {
        run_id: Uuid,
        topic: String,
        role_count: usize,
    },

    /// A role began executing
    #[serde(rename = "role.started")]
    RoleStarted { run_id: Uuid, role: String },

    /// A role finished with generated text
    #[serde(rename = "role.completed")]
    RoleCompleted {
        run_id: Uuid,
        role: String,
        text_length: usize,
    },

    /// A role failed; the run continues with the remaining roles
    #[serde(rename = "role.failed")]
    RoleFailed {
        run_id: Uuid,
        role: String,
        error: String,
    },

    /// All roles reached a terminal state
    #[serde(rename = "run.completed")]
    RunCompleted {
        run_id: Uuid,
        succeeded: usize,
        failed: usize,
    },

    /// Generic error event
    #[serde(rename = "error")]
    Error {
        message: String,
        context: Option<String>,
    },
}

impl Event {
    /// Stable event-type tag used for SSE event names.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run.started",
            Self::RoleStarted { .. } => "role.started",
            Self::RoleCompleted { .. } => "role.completed",
            Self::RoleFailed { .. } => "role.failed",
            Self::RunCompleted { .. } => "run.completed",
            Self::Error { .. } => "error",
        }
    }
}
