//! Per-run log capture.
//!
//! Each run owns its own `RunLog`; role tasks append lines through cheap
//! clones while the coordinator takes a snapshot into `RunResult.logs` once
//! all roles are terminal. The buffer lives and dies with the run, so there
//! is no global sink to attach or detach.

use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct RunLog {
    buffer: Arc<Mutex<String>>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line to the run log.
    pub fn push(&self, line: impl AsRef<str>) {
        let mut buffer = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.push_str(line.as_ref());
        buffer.push('\n');
    }

    /// Current contents of the log.
    pub fn snapshot(&self) -> String {
        match self.buffer.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog")
            .field("bytes", &self.snapshot().len())
            .finish()
    }
}
