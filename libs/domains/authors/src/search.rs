use std::sync::Arc;

use crate::embedding::EmbeddingProvider;
use crate::error::AuthorResult;
use crate::models::SimilarityMatch;
use crate::store::VectorStore;

/// Turns free text into ranked author matches.
///
/// The two steps are strictly sequential: embed the query, then run the
/// store-side ranked similarity query with the resulting vector. Results are
/// returned exactly as the store ordered them. There is no keyword fallback
/// when the embedding provider is down, and no retries; retry policy belongs
/// to the deployment layer above.
pub struct SimilaritySearchEngine<S: VectorStore> {
    store: Arc<S>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl<S: VectorStore> Clone for SimilaritySearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            embeddings: self.embeddings.clone(),
        }
    }
}

impl<S: VectorStore> SimilaritySearchEngine<S> {
    pub fn new(store: Arc<S>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embeddings }
    }

    /// Embed `query` and return the `top_k` records scoring strictly above
    /// `threshold`, ordered by descending similarity.
    ///
    /// `top_k` bounds are enforced at the HTTP boundary, not here.
    pub async fn search_by_text(
        &self,
        query: &str,
        top_k: u32,
        threshold: f32,
    ) -> AuthorResult<Vec<SimilarityMatch>> {
        let query_embedding = self.embeddings.embed(query).await?;

        let matches = self
            .store
            .query_by_similarity(&query_embedding, top_k, threshold)
            .await?;

        tracing::debug!(
            query_len = query.len(),
            top_k,
            threshold,
            matched = matches.len(),
            "Similarity search completed"
        );

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::error::AuthorError;
    use crate::models::CreateAuthor;
    use crate::store::{InMemoryVectorStore, MockVectorStore};

    fn author(name: &str, email: &str) -> CreateAuthor {
        CreateAuthor {
            name: name.to_string(),
            email: email.to_string(),
            bio: format!("{} writes books", name),
            expertise: "fiction".to_string(),
        }
    }

    /// Deterministic embedder: a fixed vector per known input string.
    fn stub_embedder(pairs: Vec<(&'static str, Vec<f32>)>) -> MockEmbeddingProvider {
        let mut mock = MockEmbeddingProvider::new();
        mock.expect_dimension().return_const(3usize);
        mock.expect_embed().returning(move |text| {
            pairs
                .iter()
                .find(|(key, _)| *key == text)
                .map(|(_, v)| Ok(v.clone()))
                .unwrap_or_else(|| Ok(vec![0.0, 0.0, 1.0]))
        });
        mock
    }

    #[tokio::test]
    async fn test_dystopian_author_ranks_first() {
        let store = Arc::new(InMemoryVectorStore::new(3));

        // A's profile embedding is nearly parallel to the "dystopian" query
        // vector; B and C point elsewhere.
        store
            .insert(author("A", "a@x.com"), vec![0.95, 0.05, 0.0])
            .await
            .unwrap();
        store
            .insert(author("B", "b@x.com"), vec![0.1, 0.9, 0.0])
            .await
            .unwrap();
        store
            .insert(author("C", "c@x.com"), vec![0.0, 0.2, 0.8])
            .await
            .unwrap();

        let embedder = stub_embedder(vec![("dystopian future", vec![1.0, 0.0, 0.0])]);
        let engine = SimilaritySearchEngine::new(store, Arc::new(embedder));

        let matches = engine
            .search_by_text("dystopian future", 2, 0.0)
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "A");
        assert!(matches[0].similarity_score > matches[1].similarity_score);
    }

    #[tokio::test]
    async fn test_embedding_failure_fails_the_search() {
        let store = Arc::new(InMemoryVectorStore::new(3));

        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|_| Err(AuthorError::EmbeddingUnavailable("timeout".to_string())));

        let engine = SimilaritySearchEngine::new(store, Arc::new(embedder));
        let result = engine.search_by_text("anything", 5, 0.0).await;

        assert!(matches!(result, Err(AuthorError::EmbeddingUnavailable(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockVectorStore::new();
        store
            .expect_query_by_similarity()
            .returning(|_, _, _| Err(AuthorError::StoreUnavailable("connection lost".to_string())));

        let embedder = stub_embedder(vec![]);
        let engine = SimilaritySearchEngine::new(Arc::new(store), Arc::new(embedder));

        let result = engine.search_by_text("anything", 5, 0.0).await;
        assert!(matches!(result, Err(AuthorError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_results_pass_through_unchanged() {
        let store = Arc::new(InMemoryVectorStore::new(3));
        store
            .insert(author("Solo", "solo@x.com"), vec![1.0, 0.0, 0.0])
            .await
            .unwrap();

        let embedder = stub_embedder(vec![("q", vec![1.0, 0.0, 0.0])]);
        let engine = SimilaritySearchEngine::new(store.clone(), Arc::new(embedder));

        let from_engine = engine.search_by_text("q", 5, 0.0).await.unwrap();
        let from_store = store
            .query_by_similarity(&[1.0, 0.0, 0.0], 5, 0.0)
            .await
            .unwrap();

        assert_eq!(from_engine.len(), from_store.len());
        assert_eq!(from_engine[0].id, from_store[0].id);
        assert_eq!(
            from_engine[0].similarity_score,
            from_store[0].similarity_score
        );
    }
}
