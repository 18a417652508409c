//! Type-safe error codes for API responses.
//!
//! Single source of truth for error codes used across the workspace. Each
//! error code carries:
//! - a string identifier for client consumption (e.g. "VALIDATION_ERROR")
//! - an integer code for logging and monitoring (e.g. 1001)
//! - a default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid JSON format in request body
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state (e.g., duplicate resource)
    Conflict,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Retrieval pipeline errors (6000s)
    /// Embedding provider call failed
    EmbeddingUnavailable,

    /// Text generation provider call failed
    GenerationFailed,

    /// No records scored above the grounding threshold for a question
    NoGroundingContext,

    /// Vector store query or insert failed
    StoreUnavailable,

    /// Embedding length does not match the store's configured dimension
    DimensionMismatch,

    // Upstream service errors (7000s)
    /// A dependent service could not be reached
    UpstreamUnavailable,
}

impl ErrorCode {
    /// String identifier returned to clients in the `error` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::JsonExtraction => "INVALID_JSON",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::EmbeddingUnavailable => "EMBEDDING_UNAVAILABLE",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::NoGroundingContext => "NO_GROUNDING_CONTEXT",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::JsonExtraction => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Conflict => 1008,
            ErrorCode::InternalError => 1005,
            ErrorCode::ServiceUnavailable => 1006,
            ErrorCode::EmbeddingUnavailable => 6001,
            ErrorCode::GenerationFailed => 6002,
            ErrorCode::NoGroundingContext => 6003,
            ErrorCode::StoreUnavailable => 6004,
            ErrorCode::DimensionMismatch => 6005,
            ErrorCode::UpstreamUnavailable => 7001,
        }
    }

    /// Default human-readable message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::JsonExtraction => "Invalid JSON in request body",
            ErrorCode::NotFound => "Requested resource was not found",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::InternalError => "An unexpected error occurred",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
            ErrorCode::EmbeddingUnavailable => "Embedding provider is unavailable",
            ErrorCode::GenerationFailed => "Text generation failed",
            ErrorCode::NoGroundingContext => "No matching records to ground an answer on",
            ErrorCode::StoreUnavailable => "Vector store is unavailable",
            ErrorCode::DimensionMismatch => "Embedding dimension does not match store configuration",
            ErrorCode::UpstreamUnavailable => "Upstream service is unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::NoGroundingContext.as_str(), "NO_GROUNDING_CONTEXT");
        assert_eq!(ErrorCode::NoGroundingContext.code(), 6003);
    }

    #[test]
    fn test_grounding_code_is_distinct_from_not_found() {
        assert_ne!(
            ErrorCode::NoGroundingContext.code(),
            ErrorCode::NotFound.code()
        );
        assert_ne!(
            ErrorCode::NoGroundingContext.as_str(),
            ErrorCode::NotFound.as_str()
        );
    }
}
