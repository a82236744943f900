//! Health check and connectivity test handlers.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, PlatformResults};
use crate::state::AppState;
use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health routes.
///
/// # Routes
/// - `GET /health` - Service status, never touches a platform
/// - `GET /test` - Connection test against every enabled platform
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(test_connections))
}

/// Reports service status and the enabled platforms.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.services.registry.enabled_platforms(),
        state.application.version.clone(),
    ))
}

/// Tests the connection to every enabled platform.
///
/// Always answers 200; failures show up per platform.
#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Connection test result per enabled platform", body = PlatformResults)
    ),
    tag = HEALTH_TAG
)]
pub async fn test_connections(State(state): State<AppState>) -> Json<PlatformResults> {
    let outcomes = state.services.registry.test_all().await;

    for (platform, outcome) in &outcomes {
        if let Some(error) = outcome.error() {
            tracing::error!(platform = %platform, error = %error, "Connection test failed");
        }
    }

    Json(PlatformResults::from(outcomes.as_slice()))
}
