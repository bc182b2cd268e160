use axum::extract::State;
use axum::Json;
use draftcrew_core::RunResult;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub topic: String,
}

/// Run the full crew for one topic and return the aggregated result.
///
/// The response is always complete: every configured role has an entry, and
/// failed roles carry their error text. Empty topics are rejected here so
/// the executors can keep passing input through verbatim.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Article generated", body = RunResult),
        (status = 400, description = "Empty topic")
    ),
    tag = "generate"
)]
pub async fn generate_article(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<RunResult>, AppError> {
    let topic = payload.topic.trim();
    if topic.is_empty() {
        return Err(AppError::BadRequest("Topic cannot be empty".to_string()));
    }

    let run = state.crew.run(topic).await?;
    Ok(Json(run))
}
