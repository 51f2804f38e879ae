//! Error types for the task service and client
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Task Error Enum ==
/// Unified error type for the task service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// No task with the requested id
    #[error("Task not found")]
    NotFound(String),

    /// Payload violated one or more rules; each entry names one rule
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Body could not be decoded
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// No route matches the request
    #[error("Route not found")]
    RouteNotFound,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::NotFound(_) | TaskError::RouteNotFound => StatusCode::NOT_FOUND,
            TaskError::Validation(_) | TaskError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TaskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error.
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            TaskError::Validation(details) => {
                ErrorResponse::with_details(self.to_string(), details.clone())
            }
            TaskError::Internal(msg) => ErrorResponse::new(msg.clone()),
            _ => ErrorResponse::new(self.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        if let TaskError::Internal(msg) = &self {
            error!("Unhandled error: {}", msg);
        }
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the task service.
pub type Result<T> = std::result::Result<T, TaskError>;

// == Client Error Enum ==
/// Errors surfaced by the task client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Vec<String>,
    },

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The local view holds no task with this id
    #[error("Unknown task: {0}")]
    UnknownTask(u64),
}

impl ClientError {
    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

impl From<TaskError> for ClientError {
    fn from(err: TaskError) -> Self {
        let status = err.status_code().as_u16();
        let body = err.to_body();
        ClientError::Api {
            status,
            message: body.error,
            details: body.details.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TaskError::NotFound("9".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TaskError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TaskError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_carries_details() {
        let body = TaskError::Validation(vec!["Title bad".into()]).to_body();
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.details, Some(vec!["Title bad".to_string()]));
    }

    #[test]
    fn test_client_error_from_task_error() {
        let err = ClientError::from(TaskError::NotFound("3".into()));
        assert!(err.is_not_found());
        match err {
            ClientError::Api { message, details, .. } => {
                assert_eq!(message, "Task not found");
                assert!(details.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
