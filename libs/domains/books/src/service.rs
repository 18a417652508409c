use std::sync::Arc;

use crate::authors_client::AuthorDirectory;
use crate::error::{BookError, BookResult};
use crate::models::{AuthorRef, Book, BookFilter, CreateBook, UpdateBook};
use crate::repository::BookRepository;

/// Service layer for catalog business logic
pub struct BookService<R: BookRepository, A: AuthorDirectory> {
    repository: Arc<R>,
    authors: Arc<A>,
}

impl<R: BookRepository, A: AuthorDirectory> Clone for BookService<R, A> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            authors: self.authors.clone(),
        }
    }
}

impl<R: BookRepository, A: AuthorDirectory> BookService<R, A> {
    pub fn new(repository: Arc<R>, authors: Arc<A>) -> Self {
        Self { repository, authors }
    }

    pub async fn create_book(&self, input: CreateBook) -> BookResult<Book> {
        self.repository.create(input).await
    }

    pub async fn get_book(&self, id: i64) -> BookResult<Book> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    pub async fn list_books(&self, filter: BookFilter) -> BookResult<Vec<Book>> {
        self.repository.list(filter).await
    }

    pub async fn update_book(&self, id: i64, update: UpdateBook) -> BookResult<Book> {
        self.repository.update(id, update).await
    }

    pub async fn delete_book(&self, id: i64) -> BookResult<()> {
        if !self.repository.delete(id).await? {
            return Err(BookError::NotFound(id));
        }
        Ok(())
    }

    /// Resolve the author of a book against the authors directory.
    pub async fn author_for_book(&self, id: i64) -> BookResult<AuthorRef> {
        let book = self.get_book(id).await?;

        self.authors
            .get_author(book.author_id)
            .await?
            .ok_or(BookError::AuthorNotFound(book.author_id))
    }
}
