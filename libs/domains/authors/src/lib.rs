//! Authors Domain Library
//!
//! Author directory with embedding-backed similarity search and
//! retrieval-augmented question answering.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────────┐
//! │  AuthorRegistry  │   │   RagOrchestrator    │  ← create/read/summarize, Q&A
//! └────────┬─────────┘   └──────────┬───────────┘
//!          │                        │
//!          │             ┌──────────▼───────────┐
//!          │             │SimilaritySearchEngine│  ← text → embedding → ranked matches
//!          │             └──────────┬───────────┘
//! ┌────────▼────────┐    ┌──────────▼───────────┐
//! │   VectorStore   │    │  EmbeddingProvider   │
//! │    (trait)      │    │TextGenerationProvider│
//! └────────┬────────┘    └──────────┬───────────┘
//! ┌────────▼────────┐    ┌──────────▼───────────┐
//! │  PgVectorStore  │    │    OpenAiProvider    │
//! │InMemoryVectorStore│  │  (OpenAI-compatible) │
//! └─────────────────┘    └──────────────────────┘
//! ```
//!
//! Every component takes its collaborators as constructor parameters, so
//! tests substitute deterministic stubs for the store and both providers.

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres_store;
pub mod rag;
pub mod registry;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAiConfig, OpenAiProvider, TextGenerationProvider};
pub use error::{AuthorError, AuthorResult};
pub use handlers::{ApiDoc, AuthorsState};
pub use models::{
    Answer, AskQuestion, Author, AuthorResponse, AuthorSummary, CreateAuthor, SearchAuthors,
    SimilarityMatch,
};
pub use postgres_store::PgVectorStore;
pub use rag::{RagConfig, RagOrchestrator};
pub use registry::AuthorRegistry;
pub use search::SimilaritySearchEngine;
pub use store::{InMemoryVectorStore, VectorStore};
