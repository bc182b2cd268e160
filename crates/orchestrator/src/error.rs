use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("No roles configured; nothing to run")]
    NoRolesConfigured,

    #[error("Invalid role configuration: {0}")]
    InvalidRole(#[from] draftcrew_core::CoreError),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
