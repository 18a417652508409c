//! Books Domain Library
//!
//! Catalog service over book records: plain CRUD plus a cross-service lookup
//! resolving a book's author against the authors directory over HTTP.

pub mod authors_client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use authors_client::{AuthorDirectory, HttpAuthorDirectory};
pub use error::{BookError, BookResult};
pub use handlers::ApiDoc;
pub use models::{AuthorRef, Book, BookFilter, CreateBook, UpdateBook};
pub use repository::{BookRepository, InMemoryBookRepository};
pub use service::BookService;
