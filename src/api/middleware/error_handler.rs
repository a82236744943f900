//! Error handler for converting AppError to HTTP responses.
//!
//! `AppError` renders as a JSON [`ErrorResponse`]. [`global_error_handler`]
//! normalizes every other 4xx/5xx (router 404/405, rejected bodies) into the
//! same shape and stamps the request ID onto error bodies.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest error body the global handler will buffer and rewrite.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - Validation, ValidationErrors, BadRequest → 400 BAD_REQUEST
    /// - Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// Internal error sources are logged, never sent to the client.
    fn into_response(self) -> Response {
        let error_response = match &self {
            AppError::Validation { field, reason } => {
                ErrorResponse::validation_error(field, reason)
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(json!({ "errors": errors }))
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error while serving request");
                ErrorResponse::new(
                    "CONFIGURATION_ERROR",
                    &format!("Configuration error: {}", key),
                )
                .with_details(json!({ "key": key }))
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error while serving request");
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        };

        (error_to_status_code(&self), Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Global error handling middleware.
///
/// Must run inside `request_id_middleware` so the request ID is available.
/// - Non-JSON error responses are replaced by an `ErrorResponse`, keeping
///   the original body text as the message when there is one.
/// - JSON `ErrorResponse` bodies get the request ID added.
/// - Any other response is returned as-is.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .unwrap_or_else(|_| Bytes::new());

    let mut error_response = if is_json {
        match serde_json::from_slice::<ErrorResponse>(&body_bytes) {
            Ok(error_response) => error_response,
            Err(_) => return Response::from_parts(parts, Body::from(body_bytes)),
        }
    } else {
        let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();
        fallback_error_response(status, original_message)
    };

    if error_response.request_id.is_none() {
        if let Some(id) = &request_id {
            error_response = error_response.with_request_id(id);
        }
    }

    let mut rewritten = (status, Json(error_response)).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }
    rewritten
}

/// Builds the standard body for an error response that had none.
fn fallback_error_response(status: StatusCode, original_message: String) -> ErrorResponse {
    let (code, default_message) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => (
            "METHOD_NOT_ALLOWED",
            "HTTP method not allowed for this endpoint",
        ),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::INTERNAL_SERVER_ERROR => {
            ("INTERNAL_SERVER_ERROR", "An internal server error occurred")
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        _ if status.is_client_error() => ("CLIENT_ERROR", "The request could not be processed"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    let message = if original_message.is_empty() {
        default_message.to_string()
    } else {
        original_message
    };
    ErrorResponse::new(code, &message)
}
