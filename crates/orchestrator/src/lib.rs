pub mod crew;
pub mod error;
pub mod executor;
pub mod roles;
pub mod run_log;

pub use crew::{Crew, CrewConfig, DEFAULT_FINAL_ROLE};
pub use error::{OrchestratorError, Result};
pub use executor::RoleExecutor;
pub use roles::builtin_crew;
pub use run_log::RunLog;
