use std::sync::Arc;

use crate::embedding::{EmbeddingProvider, TextGenerationProvider};
use crate::error::{AuthorError, AuthorResult};
use crate::models::{Author, AuthorSummary, CreateAuthor};
use crate::store::VectorStore;

/// Service layer for the author directory.
///
/// Creation computes the profile embedding synchronously before the single
/// insert, so no record ever exists in storage without its embedding. The
/// two steps are not atomic across retries: if the insert fails after a
/// successful embed call, the caller re-issues the whole create and no
/// partial record is left behind.
pub struct AuthorRegistry<S: VectorStore> {
    store: Arc<S>,
    embeddings: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerationProvider>,
    summary_max_tokens: u32,
}

impl<S: VectorStore> Clone for AuthorRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            embeddings: self.embeddings.clone(),
            generator: self.generator.clone(),
            summary_max_tokens: self.summary_max_tokens,
        }
    }
}

/// The text a profile embedding is computed from. The format is load-bearing:
/// changing it silently shifts every new record relative to existing vectors.
pub fn embedding_source(name: &str, bio: &str, expertise: &str) -> String {
    format!("{}. {} Expertise: {}", name, bio, expertise)
}

fn summary_prompt(author: &Author) -> String {
    format!(
        "Analyze the following author profile and write a concise summary:\n\n\
         Name: {}\nBio: {}\nExpertise: {}\n\n\
         Provide a 2-3 sentence summary highlighting this author's main strengths and contributions.",
        author.name, author.bio, author.expertise
    )
}

impl<S: VectorStore> AuthorRegistry<S> {
    pub fn new(
        store: Arc<S>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerationProvider>,
        summary_max_tokens: u32,
    ) -> Self {
        Self {
            store,
            embeddings,
            generator,
            summary_max_tokens,
        }
    }

    /// Create a new author: embed the profile text, then insert.
    pub async fn create(&self, input: CreateAuthor) -> AuthorResult<Author> {
        let source = embedding_source(&input.name, &input.bio, &input.expertise);
        let embedding = self.embeddings.embed(&source).await?;

        self.store.insert(input, embedding).await
    }

    /// Fetch an author by id, failing with `NotFound` when absent.
    pub async fn get_by_id(&self, id: i64) -> AuthorResult<Author> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AuthorError::NotFound(id))
    }

    /// All authors ordered by id ascending, bounded to `limit`.
    pub async fn list_all(&self, limit: u64) -> AuthorResult<Vec<Author>> {
        self.store.list_all(limit).await
    }

    /// Generate a short profile summary for an author.
    pub async fn summarize(&self, id: i64) -> AuthorResult<AuthorSummary> {
        let author = self.get_by_id(id).await?;

        let summary = self
            .generator
            .generate(&summary_prompt(&author), self.summary_max_tokens)
            .await?;

        Ok(AuthorSummary {
            author: author.into(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{MockEmbeddingProvider, MockTextGenerationProvider};
    use crate::store::InMemoryVectorStore;

    fn input() -> CreateAuthor {
        CreateAuthor {
            name: "X".to_string(),
            email: "x@example.com".to_string(),
            bio: "Writes about storage engines.".to_string(),
            expertise: "databases".to_string(),
        }
    }

    fn registry_with(
        store: Arc<InMemoryVectorStore>,
        embeddings: MockEmbeddingProvider,
        generator: MockTextGenerationProvider,
    ) -> AuthorRegistry<InMemoryVectorStore> {
        AuthorRegistry::new(store, Arc::new(embeddings), Arc::new(generator), 256)
    }

    #[test]
    fn test_embedding_source_format() {
        assert_eq!(
            embedding_source("X", "A bio.", "databases"),
            "X. A bio. Expertise: databases"
        );
    }

    #[tokio::test]
    async fn test_create_embeds_the_documented_source_text() {
        let store = Arc::new(InMemoryVectorStore::new(3));

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings
            .expect_embed()
            .withf(|text| text == "X. Writes about storage engines. Expertise: databases")
            .times(1)
            .returning(|_| Ok(vec![0.5, 0.5, 0.5]));

        let registry = registry_with(store.clone(), embeddings, MockTextGenerationProvider::new());

        let created = registry.create(input()).await.unwrap();

        // The vector is stored verbatim
        let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.embedding, Some(vec![0.5, 0.5, 0.5]));
    }

    #[tokio::test]
    async fn test_duplicate_create_leaves_count_unchanged() {
        let store = Arc::new(InMemoryVectorStore::new(2));

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings
            .expect_embed()
            .returning(|_| Ok(vec![1.0, 0.0]));

        let registry = registry_with(store.clone(), embeddings, MockTextGenerationProvider::new());

        registry.create(input()).await.unwrap();
        let result = registry.create(input()).await;

        assert!(matches!(result, Err(AuthorError::DuplicateEmail(_))));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_fails_when_embedding_unavailable() {
        let store = Arc::new(InMemoryVectorStore::new(2));

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings
            .expect_embed()
            .returning(|_| Err(AuthorError::EmbeddingUnavailable("down".to_string())));

        let registry = registry_with(store.clone(), embeddings, MockTextGenerationProvider::new());

        let result = registry.create(input()).await;
        assert!(matches!(result, Err(AuthorError::EmbeddingUnavailable(_))));
        // No partial record was persisted
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let store = Arc::new(InMemoryVectorStore::new(2));
        let registry = registry_with(
            store,
            MockEmbeddingProvider::new(),
            MockTextGenerationProvider::new(),
        );

        let result = registry.get_by_id(42).await;
        assert!(matches!(result, Err(AuthorError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_summarize_uses_profile_and_token_budget() {
        let store = Arc::new(InMemoryVectorStore::new(2));

        let mut embeddings = MockEmbeddingProvider::new();
        embeddings
            .expect_embed()
            .returning(|_| Ok(vec![1.0, 0.0]));

        let mut generator = MockTextGenerationProvider::new();
        generator
            .expect_generate()
            .withf(|prompt, max_tokens| {
                prompt.contains("Name: X")
                    && prompt.contains("Expertise: databases")
                    && *max_tokens == 256
            })
            .times(1)
            .returning(|_, _| Ok("A concise summary.".to_string()));

        let registry = registry_with(store, embeddings, generator);

        let created = registry.create(input()).await.unwrap();
        let summary = registry.summarize(created.id).await.unwrap();

        assert_eq!(summary.summary, "A concise summary.");
        assert_eq!(summary.author.email, "x@example.com");
    }

    #[tokio::test]
    async fn test_summarize_missing_author_skips_generator() {
        let store = Arc::new(InMemoryVectorStore::new(2));

        let mut generator = MockTextGenerationProvider::new();
        generator.expect_generate().times(0);

        let registry = registry_with(store, MockEmbeddingProvider::new(), generator);

        let result = registry.summarize(7).await;
        assert!(matches!(result, Err(AuthorError::NotFound(7))));
    }
}
