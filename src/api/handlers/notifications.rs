//! Notification API handlers.

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{ErrorResponse, NotifyRequest, NotifyResponse};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates notification routes.
///
/// Routes:
/// - POST /notify - Send a message to the requested or all enabled platforms
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(notify))
}

/// POST /notify - Send a notification
///
/// Omitting `platforms` sends to every enabled platform; an empty list sends
/// to none. A requested platform that is not configured is reported as a
/// failed result. Platform failures never change the status code.
#[utoipa::path(
    post,
    path = "/notify",
    tag = NOTIFICATION_TAG,
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Per-platform delivery results", body = NotifyResponse),
        (status = 400, description = "Empty message, malformed JSON or unknown platform", body = ErrorResponse)
    )
)]
pub async fn notify(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NotifyRequest>,
) -> Json<NotifyResponse> {
    let result = state
        .services
        .notifications
        .dispatch(&request.message, request.platforms.as_deref())
        .await;

    for (platform, outcome) in &result.results {
        if let Some(error) = outcome.error() {
            tracing::error!(platform = %platform, error = %error, "Failed to send notification");
        }
    }

    Json(NotifyResponse::from(result))
}
