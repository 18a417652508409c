//! API routes module

use axum::{Json, Router, http::StatusCode, routing::get};
use domain_books::{BookService, HttpAuthorDirectory, InMemoryBookRepository, handlers};
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;

/// Create all API routes
pub fn routes(config: &Config) -> Router {
    let repository = Arc::new(InMemoryBookRepository::with_seed_catalog());
    let authors = Arc::new(HttpAuthorDirectory::new(config.authors_api_url.clone()));
    let service = BookService::new(repository, authors);

    Router::new().nest("/books", handlers::router(service))
}

/// Readiness router. The catalog has no backing connections, so ready
/// mirrors liveness.
pub fn ready_router() -> Router {
    Router::new().route(
        "/ready",
        get(|| async { (StatusCode::OK, Json(json!({"status": "ready"}))) }),
    )
}
