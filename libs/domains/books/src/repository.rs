use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{BookError, BookResult};
use crate::models::{Book, BookFilter, CreateBook, UpdateBook};

/// Repository trait for Book persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Create a new book, assigning its id
    async fn create(&self, input: CreateBook) -> BookResult<Book>;

    /// Get a book by id
    async fn get_by_id(&self, id: i64) -> BookResult<Option<Book>>;

    /// List books ordered by id ascending
    async fn list(&self, filter: BookFilter) -> BookResult<Vec<Book>>;

    /// Apply a partial update to an existing book
    async fn update(&self, id: i64, update: UpdateBook) -> BookResult<Book>;

    /// Delete a book by id, returning whether it existed
    async fn delete(&self, id: i64) -> BookResult<bool>;
}

struct Inner {
    next_id: i64,
    books: BTreeMap<i64, Book>,
}

/// In-memory implementation of BookRepository.
///
/// The catalog ships with a small seed so the service answers from first
/// boot; ids keep counting from the seed.
#[derive(Clone)]
pub struct InMemoryBookRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                books: BTreeMap::new(),
            })),
        }
    }

    /// Repository pre-populated with the shipped catalog entries.
    ///
    /// Their author ids line up with the authors directory's seed data so
    /// the cross-service lookup works out of the box.
    pub fn with_seed_catalog() -> Self {
        let seed = [
            Book {
                id: 1,
                title: "The Hitchhiker's Guide to the Galaxy".to_string(),
                author_id: 1,
                description: Some(
                    "The funniest science fiction comedy ever written.".to_string(),
                ),
                price: 42.0,
            },
            Book {
                id: 2,
                title: "1984".to_string(),
                author_id: 2,
                description: Some(
                    "A dystopian future where Big Brother is always watching.".to_string(),
                ),
                price: 35.5,
            },
            Book {
                id: 3,
                title: "Dune".to_string(),
                author_id: 3,
                description: Some(
                    "An epic science fiction saga of power, religion and ecology.".to_string(),
                ),
                price: 59.9,
            },
        ];

        let mut books = BTreeMap::new();
        for book in seed {
            books.insert(book.id, book);
        }

        Self {
            inner: Arc::new(RwLock::new(Inner { next_id: 4, books })),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, input: CreateBook) -> BookResult<Book> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let book = Book {
            id,
            title: input.title,
            author_id: input.author_id,
            description: input.description,
            price: input.price,
        };

        inner.books.insert(id, book.clone());

        tracing::info!(book_id = id, title = %book.title, "Created book");
        Ok(book)
    }

    async fn get_by_id(&self, id: i64) -> BookResult<Option<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.get(&id).cloned())
    }

    async fn list(&self, filter: BookFilter) -> BookResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner
            .books
            .values()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, update: UpdateBook) -> BookResult<Book> {
        let mut inner = self.inner.write().await;

        let book = inner
            .books
            .get_mut(&id)
            .ok_or(BookError::NotFound(id))?;

        book.apply_update(update);
        let updated = book.clone();

        tracing::info!(book_id = id, "Updated book");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> BookResult<bool> {
        let mut inner = self.inner.write().await;

        if inner.books.remove(&id).is_some() {
            tracing::info!(book_id = id, "Deleted book");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author_id: 1,
            description: None,
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_seed_catalog_contents() {
        let repo = InMemoryBookRepository::with_seed_catalog();

        let books = repo.list(BookFilter::default()).await.unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].title, "The Hitchhiker's Guide to the Galaxy");
        assert_eq!(books[1].title, "1984");
        assert_eq!(books[2].title, "Dune");

        // Ids keep counting past the seed
        let created = repo.create(input("New Book")).await.unwrap();
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryBookRepository::new();

        let created = repo.create(input("Some Book")).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = repo.get_by_id(1).await.unwrap();
        assert_eq!(fetched.unwrap().title, "Some Book");
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let repo = InMemoryBookRepository::new();
        for i in 0..5 {
            repo.create(input(&format!("Book {}", i))).await.unwrap();
        }

        let page = repo
            .list(BookFilter { limit: 2, offset: 2 })
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 3);
        assert_eq!(page[1].id, 4);
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let repo = InMemoryBookRepository::new();
        let result = repo.update(99, UpdateBook::default()).await;
        assert!(matches!(result, Err(BookError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryBookRepository::new();
        let created = repo.create(input("Gone Soon")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
