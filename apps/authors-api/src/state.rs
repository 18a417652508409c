//! Application state management

use database::postgres::DatabaseConnection;
use domain_authors::OpenAiProvider;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub provider: Arc<OpenAiProvider>,
}
