use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{EmbeddingProvider, TextGenerationProvider};
use crate::error::{AuthorError, AuthorResult};

/// Configuration for the OpenAI-compatible model provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub generation_model: String,
    pub dimension: usize,
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            generation_model: "gpt-4o-mini".to_string(),
            dimension: 1024,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Load from environment variables:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default: https://api.openai.com/v1)
    /// - `EMBEDDING_MODEL` (default: text-embedding-3-small)
    /// - `GENERATION_MODEL` (default: gpt-4o-mini)
    /// - `EMBEDDING_DIMENSION` (default: 1024, must match the store schema)
    pub fn from_env() -> AuthorResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AuthorError::Validation("OPENAI_API_KEY not set".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let embedding_model = std::env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string());

        let generation_model =
            std::env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let dimension = std::env::var("EMBEDDING_DIMENSION")
            .unwrap_or_else(|_| "1024".to_string())
            .parse()
            .map_err(|e| AuthorError::Validation(format!("Invalid EMBEDDING_DIMENSION: {}", e)))?;

        Ok(Self {
            api_key,
            base_url,
            embedding_model,
            generation_model,
            dimension,
        })
    }
}

/// Model provider speaking the OpenAI-compatible REST API.
///
/// One client serves both capabilities: `/embeddings` for vectors and
/// `/chat/completions` for generated text.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> AuthorResult<Self> {
        Ok(Self::new(OpenAiConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
    dimensions: u32,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> AuthorResult<Vec<f32>> {
        let request = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: vec![text.to_string()],
            dimensions: self.config.dimension as u32,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthorError::EmbeddingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthorError::EmbeddingUnavailable(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AuthorError::EmbeddingUnavailable(e.to_string()))?;

        // Sort by index to maintain order
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        data.into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AuthorError::EmbeddingUnavailable("No embedding returned".to_string()))
    }
}

#[async_trait]
impl TextGenerationProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AuthorResult<String> {
        let request = ChatRequest {
            model: self.config.generation_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature: 0.7,
            top_p: 0.9,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthorError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthorError::GenerationFailed(format!(
                "Generation API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AuthorError::GenerationFailed(e.to_string()))?;

        // No content is a valid, empty result
        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::new("key".to_string());
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.dimension, 1024);
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("test-key")),
                ("OPENAI_BASE_URL", Some("http://localhost:8000/v1")),
                ("EMBEDDING_DIMENSION", Some("256")),
            ],
            || {
                let config = OpenAiConfig::from_env().unwrap();
                assert_eq!(config.api_key, "test-key");
                assert_eq!(config.base_url, "http://localhost:8000/v1");
                assert_eq!(config.dimension, 256);
            },
        );
    }

    #[test]
    fn test_config_from_env_requires_api_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            assert!(OpenAiConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_chat_response_without_content_is_empty() {
        let raw = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        assert_eq!(content, "");
    }
}
