pub mod domain;
pub mod error;

pub use domain::role::{Role, TOPIC_PLACEHOLDER};
pub use domain::run::{RoleStatus, RunResult, TaskResult, NO_FINAL_OUTPUT};
pub use error::CoreError;
