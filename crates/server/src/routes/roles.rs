use axum::extract::State;
use axum::Json;
use draftcrew_core::Role;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
    pub final_role: String,
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "Configured crew roles", body = RolesResponse)
    ),
    tag = "roles"
)]
pub async fn list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.crew.roles().to_vec(),
        final_role: state.crew.final_role().to_string(),
    })
}
