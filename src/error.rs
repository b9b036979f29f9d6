//! Error types for the book catalog

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::book::FieldError;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Marker attached to error responses so the error-page middleware can render
/// them as HTML. `detail` is only shown in development mode.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, detail) = match &self {
            // Plain message, no error page
            AppError::BadRequest(msg) => return (status, msg.clone()).into_response(),
            AppError::NotFound(msg) => (msg.clone(), None),
            AppError::Validation(errors) => (summarize(errors), None),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ("Something went wrong".to_string(), Some(e.to_string()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Something went wrong".to_string(), Some(msg.clone()))
            }
        };

        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage {
            status,
            message,
            detail,
        });
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
