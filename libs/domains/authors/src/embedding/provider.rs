use async_trait::async_trait;

use crate::error::AuthorResult;

/// Trait for embedding generation providers.
///
/// Implementations convert text into a fixed-length vector. A provider
/// failure surfaces as `EmbeddingUnavailable`; there is no fallback and no
/// retry at this level.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Output dimensionality of this provider's vectors.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> AuthorResult<Vec<f32>>;
}

/// Trait for text generation providers.
///
/// A provider failure surfaces as `GenerationFailed`. An empty string is a
/// valid (if unhelpful) result when the model returns no content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Generate text for a prompt, bounded to `max_tokens` output tokens.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AuthorResult<String>;
}
