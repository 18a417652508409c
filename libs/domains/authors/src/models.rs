use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Author entity - a directory record with an attached profile embedding.
///
/// The embedding is computed from the profile text before the record is
/// inserted, so a persisted author never exists without one. It is kept off
/// the wire; API responses use [`AuthorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier, assigned by the store on insert
    pub id: i64,
    /// Author display name
    pub name: String,
    /// Contact email, unique across all records
    pub email: String,
    /// Free-text biography
    pub bio: String,
    /// Free-text areas of expertise
    pub expertise: String,
    /// Profile embedding with the store's configured dimension
    #[serde(skip_serializing, default)]
    pub embedding: Option<Vec<f32>>,
    /// Creation timestamp, set once at insert
    pub created_at: DateTime<Utc>,
}

/// Author projection returned by the API (embedding omitted)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub expertise: String,
    pub created_at: DateTime<Utc>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            bio: author.bio,
            expertise: author.expertise,
            created_at: author.created_at,
        }
    }
}

/// DTO for creating a new author
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub bio: String,
    #[validate(length(min = 1))]
    pub expertise: String,
}

/// Author projection plus a per-query similarity score.
///
/// The score is `1 - cosine_distance(query, record)` in `[0, 1]` and is only
/// meaningful relative to the query it was computed for; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimilarityMatch {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub expertise: String,
    pub similarity_score: f32,
}

/// Request body for text similarity search
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchAuthors {
    /// Free-text query to embed and match against stored profiles
    #[validate(length(min = 1))]
    pub query: String,
    /// Number of results to return
    #[validate(range(min = 1, max = 20))]
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Minimum similarity score; results must score strictly above it
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub similarity_threshold: f32,
}

/// Request body for retrieval-grounded question answering
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AskQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    /// Number of records to retrieve as grounding context
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

/// Generated answer plus the exact records it was grounded on
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    /// The question as asked
    pub question: String,
    /// Generated answer text (may be empty if the model returned no content)
    pub answer: String,
    /// Retrieved records supplied to the generation step, in ranked order
    pub context_authors: Vec<SimilarityMatch>,
}

/// Generated profile summary for a single author
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorSummary {
    pub author: AuthorResponse,
    pub summary: String,
}

/// Query parameters for listing authors
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListAuthors {
    /// Maximum number of records to return
    #[serde(default = "default_list_limit")]
    pub limit: u64,
}

fn default_top_k() -> u32 {
    5
}

fn default_list_limit() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_response_drops_embedding() {
        let author = Author {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            bio: "Pioneer".to_string(),
            expertise: "Computing".to_string(),
            embedding: Some(vec![0.1, 0.2]),
            created_at: Utc::now(),
        };

        let response: AuthorResponse = author.into();
        assert_eq!(response.id, 7);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("embedding").is_none());
    }

    #[test]
    fn test_search_defaults() {
        let req: SearchAuthors =
            serde_json::from_str(r#"{"query": "science fiction"}"#).unwrap();
        assert_eq!(req.top_k, 5);
        assert_eq!(req.similarity_threshold, 0.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_rejects_out_of_range_top_k() {
        let req: SearchAuthors =
            serde_json::from_str(r#"{"query": "q", "top_k": 50}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_ask_rejects_top_k_above_ten() {
        let req: AskQuestion =
            serde_json::from_str(r#"{"question": "who?", "top_k": 15}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_author_requires_valid_email() {
        let req = CreateAuthor {
            name: "X".to_string(),
            email: "not-an-email".to_string(),
            bio: "bio".to_string(),
            expertise: "exp".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
