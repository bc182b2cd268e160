use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Liveness plus a glance at the crew configuration, so a probe can tell
/// "up" apart from "up but misconfigured with zero roles".
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    version: String,
    /// Number of configured crew roles
    role_count: usize,
    /// Role whose output becomes the final article
    final_role: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up and the crew is configured", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        role_count: state.crew.roles().len(),
        final_role: state.crew.final_role().to_string(),
    })
}
