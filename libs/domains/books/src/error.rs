use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, error_response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Book not found: {0}")]
    NotFound(i64),

    #[error("Author not found: {0}")]
    AuthorNotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Authors service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookResult<T> = Result<T, BookError>;

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(id) => AppError::NotFound(format!("Book {} not found", id)),
            BookError::AuthorNotFound(id) => {
                AppError::NotFound(format!("Author {} not found", id))
            }
            BookError::Validation(msg) => AppError::BadRequest(msg),
            BookError::Upstream(msg) => AppError::ServiceUnavailable(msg),
            BookError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        match self {
            // Upstream detail is logged, never returned to the client.
            BookError::Upstream(detail) => {
                tracing::error!(
                    error_code = ErrorCode::UpstreamUnavailable.code(),
                    "Authors service failure: {}",
                    detail
                );
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::UpstreamUnavailable.default_message().to_string(),
                    ErrorCode::UpstreamUnavailable,
                )
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}
