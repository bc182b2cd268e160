use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Orchestrator(OrchestratorError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            AppError::Orchestrator(err) => {
                tracing::error!("Orchestrator error: {:?}", err);
                match err {
                    OrchestratorError::NoRolesConfigured => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "no_roles_configured",
                        err.to_string(),
                    ),
                    OrchestratorError::InvalidRole(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "invalid_role",
                        err.to_string(),
                    ),
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<OrchestratorError> for AppError {
    fn from(err: OrchestratorError) -> Self {
        AppError::Orchestrator(err)
    }
}
