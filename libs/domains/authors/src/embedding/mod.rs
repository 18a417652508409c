mod openai;
mod provider;

pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{EmbeddingProvider, TextGenerationProvider};

#[cfg(test)]
pub use provider::{MockEmbeddingProvider, MockTextGenerationProvider};
