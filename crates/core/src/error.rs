use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
