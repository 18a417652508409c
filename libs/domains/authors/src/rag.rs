use std::sync::Arc;

use core_config::{ConfigError, env_parse_or_default};

use crate::embedding::TextGenerationProvider;
use crate::error::{AuthorError, AuthorResult};
use crate::models::{Answer, SimilarityMatch};
use crate::search::SimilaritySearchEngine;
use crate::store::VectorStore;

/// Tunables for the retrieval-augmented answering pipeline.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Minimum similarity score for a record to count as grounding context.
    /// Looser than a typical display-facing search threshold: the generation
    /// step can synthesize across weakly-relevant records, while search
    /// results shown to users should not include spurious matches.
    pub grounding_threshold: f32,

    /// Token budget for generated answers.
    pub answer_max_tokens: u32,

    /// Token budget for generated profile summaries.
    pub summary_max_tokens: u32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            grounding_threshold: 0.3,
            answer_max_tokens: 512,
            summary_max_tokens: 256,
        }
    }
}

impl RagConfig {
    /// Load overrides from `RAG_GROUNDING_THRESHOLD`, `RAG_ANSWER_MAX_TOKENS`
    /// and `RAG_SUMMARY_MAX_TOKENS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            grounding_threshold: env_parse_or_default(
                "RAG_GROUNDING_THRESHOLD",
                defaults.grounding_threshold,
            )?,
            answer_max_tokens: env_parse_or_default(
                "RAG_ANSWER_MAX_TOKENS",
                defaults.answer_max_tokens,
            )?,
            summary_max_tokens: env_parse_or_default(
                "RAG_SUMMARY_MAX_TOKENS",
                defaults.summary_max_tokens,
            )?,
        })
    }
}

/// Answers free-text questions grounded in retrieved author records.
///
/// The pipeline is strictly sequential: retrieve, then generate. The
/// generation step never runs without grounding context, so the model cannot
/// fabricate an answer with zero evidentiary basis.
pub struct RagOrchestrator<S: VectorStore> {
    engine: SimilaritySearchEngine<S>,
    generator: Arc<dyn TextGenerationProvider>,
    config: RagConfig,
}

impl<S: VectorStore> RagOrchestrator<S> {
    pub fn new(
        engine: SimilaritySearchEngine<S>,
        generator: Arc<dyn TextGenerationProvider>,
        config: RagConfig,
    ) -> Self {
        Self {
            engine,
            generator,
            config,
        }
    }

    /// Answer a question using the `top_k` most similar author records as
    /// grounding context.
    ///
    /// Fails with `NoGroundingContext` when nothing scores above the
    /// grounding threshold; the generator is not called in that case.
    /// Generator failures surface as `GenerationFailed`, so callers can tell
    /// "nothing to ground on" apart from "model call failed".
    pub async fn answer_question(&self, question: &str, top_k: u32) -> AuthorResult<Answer> {
        let context_authors = self
            .engine
            .search_by_text(question, top_k, self.config.grounding_threshold)
            .await?;

        if context_authors.is_empty() {
            tracing::info!(top_k, "No grounding context found for question");
            return Err(AuthorError::NoGroundingContext);
        }

        let prompt = build_answer_prompt(&context_authors, question);

        let answer = self
            .generator
            .generate(&prompt, self.config.answer_max_tokens)
            .await?;

        tracing::debug!(
            context_count = context_authors.len(),
            answer_len = answer.len(),
            "Generated grounded answer"
        );

        Ok(Answer {
            question: question.to_string(),
            answer,
            context_authors,
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}

/// Format retrieved records as labeled context blocks, blank-line separated,
/// preserving retrieval order.
pub(crate) fn format_context(matches: &[SimilarityMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "Author: {}\nEmail: {}\nBio: {}\nExpertise: {}",
                m.name, m.email, m.bio, m.expertise
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the single prompt handed to the generation provider:
/// instruction, concatenated context, then the literal question.
pub(crate) fn build_answer_prompt(matches: &[SimilarityMatch], question: &str) -> String {
    format!(
        "Based on the following author profiles:\n\n{}\n\n\
         Answer this question: {}\n\n\
         Provide a detailed and informative answer based only on the information provided.",
        format_context(matches),
        question
    )
}
