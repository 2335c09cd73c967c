//! Error types for the Book Library server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Detail sent to clients for any server-side failure
pub const UNEXPECTED_ERROR_DETAIL: &str = "An unexpected error occurred.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body failed structural validation (one entry per field error)
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Uniqueness violations are reported as 400, not 409
            AppError::Validation(_) | AppError::InvalidArgument(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}

/// RFC 7807 problem document
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, detail: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        let title = if status.is_server_error() {
            "Server Error"
        } else {
            "Request Error"
        };
        Self {
            type_uri: format!("https://httpstatuses.com/{}", status.as_u16()),
            title: title.to_string(),
            status: status.as_u16(),
            detail: detail.into(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let problem = match self {
            AppError::Validation(errors) => ProblemDetails::new(
                status,
                "One or more validation errors occurred.",
                Some(errors),
            ),
            AppError::InvalidArgument(msg) => {
                ProblemDetails::new(status, msg.clone(), Some(vec![msg]))
            }
            AppError::Conflict(msg) | AppError::NotFound(msg) => {
                ProblemDetails::new(status, msg, None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ProblemDetails::new(status, UNEXPECTED_ERROR_DETAIL, None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ProblemDetails::new(status, UNEXPECTED_ERROR_DETAIL, None)
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
