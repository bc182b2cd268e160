pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Draftcrew API",
        version = "0.1.0",
        description = "API for Draftcrew - multi-role AI article generation"
    ),
    paths(
        routes::health_check,
        routes::list_roles,
        routes::generate_article,
        routes::sse::events_stream,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::RolesResponse,
        routes::GenerateRequest,
        draftcrew_core::Role,
        draftcrew_core::RoleStatus,
        draftcrew_core::TaskResult,
        draftcrew_core::RunResult,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "roles", description = "Crew role configuration"),
        (name = "generate", description = "Article generation"),
        (name = "events", description = "Real-time event streaming (SSE)"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/", get(routes::index_page))
        .route("/health", get(routes::health_check))
        .route("/api/roles", get(routes::list_roles))
        .route("/api/generate", post(routes::generate_article))
        .route("/api/events", get(routes::sse::events_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
