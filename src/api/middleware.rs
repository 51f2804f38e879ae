//! API Middleware
//!
//! Turns handler panics into 500 responses and strips internal error
//! details when the server runs in production mode.

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::handlers::AppState;
use crate::error::TaskError;
use crate::models::ErrorResponse;

/// Message sent instead of internal error details in production mode.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Converts a caught panic payload into a 500 response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    TaskError::Internal(message).into_response()
}

/// Replaces the body of every 500 response with a generic message unless the
/// state allows error details.
pub async fn redact_internal_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if response.status() == StatusCode::INTERNAL_SERVER_ERROR && !state.expose_error_details {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(REDACTED_MESSAGE)),
        )
            .into_response();
    }

    response
}
