use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, error_response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("Author not found: {0}")]
    NotFound(i64),

    #[error("Author with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding provider error: {0}")]
    EmbeddingUnavailable(String),

    #[error("Text generation error: {0}")]
    GenerationFailed(String),

    #[error("Vector store error: {0}")]
    StoreUnavailable(String),

    #[error("No records scored above the grounding threshold")]
    NoGroundingContext,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AuthorResult<T> = Result<T, AuthorError>;

/// Convert AuthorError to AppError for the variants with a direct HTTP
/// equivalent. Provider and store failures are handled in `IntoResponse`
/// so they carry their own error codes.
impl From<AuthorError> for AppError {
    fn from(err: AuthorError) -> Self {
        match err {
            AuthorError::NotFound(id) => AppError::NotFound(format!("Author {} not found", id)),
            AuthorError::DuplicateEmail(email) => {
                AppError::Conflict(format!("Author with email '{}' already exists", email))
            }
            AuthorError::Validation(msg) => AppError::BadRequest(msg),
            AuthorError::NoGroundingContext => {
                AppError::NotFound(ErrorCode::NoGroundingContext.default_message().to_string())
            }
            AuthorError::DimensionMismatch { expected, actual } => AppError::InternalServerError(
                format!("Embedding dimension mismatch: expected {}, got {}", expected, actual),
            ),
            AuthorError::EmbeddingUnavailable(msg)
            | AuthorError::GenerationFailed(msg)
            | AuthorError::StoreUnavailable(msg)
            | AuthorError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AuthorError {
    fn into_response(self) -> Response {
        match self {
            // Distinct code so clients can tell "no answer possible" apart
            // from a plain missing resource.
            AuthorError::NoGroundingContext => error_response(
                StatusCode::NOT_FOUND,
                ErrorCode::NoGroundingContext.default_message().to_string(),
                ErrorCode::NoGroundingContext,
            ),
            // Provider internals are logged, never returned to the client.
            AuthorError::EmbeddingUnavailable(detail) => {
                tracing::error!(
                    error_code = ErrorCode::EmbeddingUnavailable.code(),
                    "Embedding provider failure: {}",
                    detail
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::EmbeddingUnavailable.default_message().to_string(),
                    ErrorCode::EmbeddingUnavailable,
                )
            }
            AuthorError::GenerationFailed(detail) => {
                tracing::error!(
                    error_code = ErrorCode::GenerationFailed.code(),
                    "Text generation failure: {}",
                    detail
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::GenerationFailed.default_message().to_string(),
                    ErrorCode::GenerationFailed,
                )
            }
            AuthorError::StoreUnavailable(detail) => {
                tracing::error!(
                    error_code = ErrorCode::StoreUnavailable.code(),
                    "Vector store failure: {}",
                    detail
                );
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StoreUnavailable.default_message().to_string(),
                    ErrorCode::StoreUnavailable,
                )
            }
            // Deployment misconfiguration, not a per-request problem.
            AuthorError::DimensionMismatch { expected, actual } => {
                tracing::error!(
                    error_code = ErrorCode::DimensionMismatch.code(),
                    expected,
                    actual,
                    "Embedding dimension does not match store configuration"
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DimensionMismatch.default_message().to_string(),
                    ErrorCode::DimensionMismatch,
                )
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}

impl From<serde_json::Error> for AuthorError {
    fn from(err: serde_json::Error) -> Self {
        AuthorError::Internal(format!("JSON error: {}", err))
    }
}
