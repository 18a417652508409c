use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AuthorError, AuthorResult};
use crate::models::{Author, CreateAuthor, SimilarityMatch};

/// Repository trait for author records with an attached embedding column.
///
/// Similarity is a store-side ranked query rather than a client-side scan:
/// the store can back `query_by_similarity` with an approximate
/// nearest-neighbor index, and callers never see more than `top_k` rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embedding dimension this store is configured for. Inserting a vector
    /// of any other length is a configuration error, not a data error.
    fn dimension(&self) -> usize;

    /// Insert a new author with its precomputed embedding.
    ///
    /// Fails with `DuplicateEmail` if the email is taken and with
    /// `DimensionMismatch` if the embedding length is wrong. On success the
    /// returned record carries the store-assigned id and timestamp.
    async fn insert(&self, input: CreateAuthor, embedding: Vec<f32>) -> AuthorResult<Author>;

    /// Fetch a single record by id.
    async fn get_by_id(&self, id: i64) -> AuthorResult<Option<Author>>;

    /// All records ordered by id ascending, bounded to `limit`.
    async fn list_all(&self, limit: u64) -> AuthorResult<Vec<Author>>;

    /// The `top_k` records most similar to `embedding` that score strictly
    /// above `threshold`, ordered by descending similarity score with ties
    /// broken by ascending id. Records without an embedding are excluded.
    async fn query_by_similarity(
        &self,
        embedding: &[f32],
        top_k: u32,
        threshold: f32,
    ) -> AuthorResult<Vec<SimilarityMatch>>;

    /// Total number of records.
    async fn count(&self) -> AuthorResult<u64>;

    /// Remove every record and reset id assignment. Used by the bulk loader.
    async fn truncate(&self) -> AuthorResult<()>;
}

/// Cosine similarity between two vectors, `1 - cosine_distance`.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

struct Inner {
    next_id: i64,
    authors: BTreeMap<i64, Author>,
}

/// In-memory implementation of VectorStore (for development and testing).
///
/// Similarity is computed in process with the same ordering and threshold
/// semantics as the PostgreSQL implementation, so tests run deterministically
/// without a database.
#[derive(Clone)]
pub struct InMemoryVectorStore {
    dimension: usize,
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryVectorStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                authors: BTreeMap::new(),
            })),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn insert(&self, input: CreateAuthor, embedding: Vec<f32>) -> AuthorResult<Author> {
        if embedding.len() != self.dimension {
            return Err(AuthorError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let mut inner = self.inner.write().await;

        let email_exists = inner
            .authors
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&input.email));
        if email_exists {
            return Err(AuthorError::DuplicateEmail(input.email));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let author = Author {
            id,
            name: input.name,
            email: input.email,
            bio: input.bio,
            expertise: input.expertise,
            embedding: Some(embedding),
            created_at: Utc::now(),
        };

        inner.authors.insert(id, author.clone());

        tracing::info!(author_id = id, email = %author.email, "Created author");
        Ok(author)
    }

    async fn get_by_id(&self, id: i64) -> AuthorResult<Option<Author>> {
        let inner = self.inner.read().await;
        Ok(inner.authors.get(&id).cloned())
    }

    async fn list_all(&self, limit: u64) -> AuthorResult<Vec<Author>> {
        let inner = self.inner.read().await;
        // BTreeMap iterates in ascending id order
        Ok(inner
            .authors
            .values()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn query_by_similarity(
        &self,
        embedding: &[f32],
        top_k: u32,
        threshold: f32,
    ) -> AuthorResult<Vec<SimilarityMatch>> {
        let inner = self.inner.read().await;

        let mut matches: Vec<SimilarityMatch> = inner
            .authors
            .values()
            .filter_map(|author| {
                let stored = author.embedding.as_ref()?;
                let score = cosine_similarity(embedding, stored);
                (score > threshold).then(|| SimilarityMatch {
                    id: author.id,
                    name: author.name.clone(),
                    email: author.email.clone(),
                    bio: author.bio.clone(),
                    expertise: author.expertise.clone(),
                    similarity_score: score,
                })
            })
            .collect();

        // Descending score, ascending id on equal scores
        matches.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        matches.truncate(top_k as usize);

        Ok(matches)
    }

    async fn count(&self) -> AuthorResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.authors.len() as u64)
    }

    async fn truncate(&self) -> AuthorResult<()> {
        let mut inner = self.inner.write().await;
        inner.authors.clear();
        inner.next_id = 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, email: &str) -> CreateAuthor {
        CreateAuthor {
            name: name.to_string(),
            email: email.to_string(),
            bio: format!("{} bio", name),
            expertise: format!("{} expertise", name),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let store = InMemoryVectorStore::new(3);

        let created = store
            .insert(create_input("Ada", "ada@example.com"), vec![0.1, 0.2, 0.3])
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.email, "ada@example.com");
        assert_eq!(fetched.bio, "Ada bio");
        assert_eq!(fetched.expertise, "Ada expertise");
        // Stored verbatim, no transformation or truncation
        assert_eq!(fetched.embedding, Some(vec![0.1, 0.2, 0.3]));
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_count_unchanged() {
        let store = InMemoryVectorStore::new(2);

        store
            .insert(create_input("A", "same@example.com"), vec![1.0, 0.0])
            .await
            .unwrap();

        let result = store
            .insert(create_input("B", "SAME@example.com"), vec![0.0, 1.0])
            .await;
        assert!(matches!(result, Err(AuthorError::DuplicateEmail(_))));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected() {
        let store = InMemoryVectorStore::new(4);

        let result = store
            .insert(create_input("A", "a@example.com"), vec![1.0, 0.0])
            .await;
        assert!(matches!(
            result,
            Err(AuthorError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all_is_id_ordered_and_idempotent() {
        let store = InMemoryVectorStore::new(2);

        for (name, email) in [("C", "c@x.com"), ("A", "a@x.com"), ("B", "b@x.com")] {
            store
                .insert(create_input(name, email), vec![1.0, 0.0])
                .await
                .unwrap();
        }

        let first = store.list_all(10).await.unwrap();
        let ids: Vec<i64> = first.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let second = store.list_all(10).await.unwrap();
        let second_ids: Vec<i64> = second.iter().map(|a| a.id).collect();
        assert_eq!(ids, second_ids);

        let bounded = store.list_all(2).await.unwrap();
        assert_eq!(bounded.len(), 2);
    }

    #[tokio::test]
    async fn test_similarity_ordering_and_top_k() {
        let store = InMemoryVectorStore::new(2);

        // Angles from the x axis: a is closest to the query, then b, then c.
        store
            .insert(create_input("a", "a@x.com"), vec![1.0, 0.0])
            .await
            .unwrap();
        store
            .insert(create_input("b", "b@x.com"), vec![0.8, 0.6])
            .await
            .unwrap();
        store
            .insert(create_input("c", "c@x.com"), vec![0.0, 1.0])
            .await
            .unwrap();

        let matches = store
            .query_by_similarity(&[1.0, 0.0], 2, 0.0)
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "a");
        assert_eq!(matches[1].name, "b");
        assert!(matches[0].similarity_score > matches[1].similarity_score);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let store = InMemoryVectorStore::new(2);

        store
            .insert(create_input("exact", "e@x.com"), vec![0.0, 1.0])
            .await
            .unwrap();

        // Orthogonal vector scores exactly 0.0, which is not > 0.0
        let matches = store
            .query_by_similarity(&[1.0, 0.0], 5, 0.0)
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_ties_break_by_ascending_id() {
        let store = InMemoryVectorStore::new(2);

        // Identical embeddings produce identical scores
        for email in ["first@x.com", "second@x.com", "third@x.com"] {
            store
                .insert(create_input(email, email), vec![0.6, 0.8])
                .await
                .unwrap();
        }

        let matches = store
            .query_by_similarity(&[0.6, 0.8], 3, 0.5)
            .await
            .unwrap();
        let ids: Vec<i64> = matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_truncate_resets_ids() {
        let store = InMemoryVectorStore::new(2);
        store
            .insert(create_input("a", "a@x.com"), vec![1.0, 0.0])
            .await
            .unwrap();

        store.truncate().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        let recreated = store
            .insert(create_input("b", "b@x.com"), vec![1.0, 0.0])
            .await
            .unwrap();
        assert_eq!(recreated.id, 1);
    }

    #[test]
    fn test_cosine_similarity_known_values() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
