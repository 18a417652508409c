//! API routes module

pub mod health;

use axum::Router;
use domain_authors::{
    AuthorRegistry, AuthorsState, EmbeddingProvider, PgVectorStore, RagOrchestrator,
    SimilaritySearchEngine, handlers,
};
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let store = Arc::new(PgVectorStore::new(
        state.db.clone(),
        state.provider.dimension(),
    ));

    let registry = AuthorRegistry::new(
        store.clone(),
        state.provider.clone(),
        state.provider.clone(),
        state.config.rag.summary_max_tokens,
    );

    let engine = SimilaritySearchEngine::new(store, state.provider.clone());
    let rag = RagOrchestrator::new(
        engine.clone(),
        state.provider.clone(),
        state.config.rag.clone(),
    );

    let authors_state = AuthorsState {
        registry,
        engine,
        rag,
    };

    Router::new().nest("/authors", handlers::router(authors_state))
}

/// Readiness router checking the database connection
pub fn ready_router(state: AppState) -> Router {
    health::router(state)
}
