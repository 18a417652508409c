use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::error::{AuthorError, AuthorResult};
use crate::models::{Author, CreateAuthor, SimilarityMatch};
use crate::store::VectorStore;

/// PostgreSQL implementation of VectorStore backed by pgvector.
///
/// The similarity query runs store-side against the `ivfflat` cosine index,
/// so ranking cost does not grow with the number of rows returned to the
/// application. `dimension` must match the deployed `vector(N)` column.
#[derive(Clone)]
pub struct PgVectorStore {
    db: DatabaseConnection,
    dimension: usize,
}

impl PgVectorStore {
    pub fn new(db: DatabaseConnection, dimension: usize) -> Self {
        Self { db, dimension }
    }
}

/// Helper struct for deserializing author rows from the database.
///
/// The embedding column is selected as `embedding::text` since the pgvector
/// wire type has no native sea-orm mapping.
#[derive(Debug, FromQueryResult)]
struct AuthorRow {
    id: i64,
    name: String,
    email: String,
    bio: String,
    expertise: String,
    embedding: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = AuthorError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let embedding = row.embedding.as_deref().map(parse_vector).transpose()?;

        Ok(Author {
            id: row.id,
            name: row.name,
            email: row.email,
            bio: row.bio,
            expertise: row.expertise,
            embedding,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct SimilarityRow {
    id: i64,
    name: String,
    email: String,
    bio: String,
    expertise: String,
    similarity_score: f64,
}

impl From<SimilarityRow> for SimilarityMatch {
    fn from(row: SimilarityRow) -> Self {
        SimilarityMatch {
            id: row.id,
            name: row.name,
            email: row.email,
            bio: row.bio,
            expertise: row.expertise,
            similarity_score: row.similarity_score as f32,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

/// Render a vector as a pgvector literal, e.g. `[0.1,0.2,0.3]`.
fn vector_literal(embedding: &[f32]) -> String {
    let parts: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(","))
}

/// Parse a pgvector text literal back into a vector.
fn parse_vector(text: &str) -> AuthorResult<Vec<f32>> {
    let trimmed = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| AuthorError::Internal(format!("Malformed vector literal: {}", text)))?;

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| AuthorError::Internal(format!("Malformed vector component: {}", e)))
        })
        .collect()
}

fn store_error(e: sea_orm::DbErr) -> AuthorError {
    AuthorError::StoreUnavailable(format!("Database error: {}", e))
}

#[async_trait]
impl VectorStore for PgVectorStore {
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

        let sql = r#"
            INSERT INTO authors (name, email, bio, expertise, embedding)
            VALUES ($1, $2, $3, $4, $5::vector)
            RETURNING id, name, email, bio, expertise, embedding::text AS embedding, created_at
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.name.clone().into(),
                input.email.clone().into(),
                input.bio.clone().into(),
                input.expertise.clone().into(),
                vector_literal(&embedding).into(),
            ],
        );

        let row = AuthorRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                    AuthorError::DuplicateEmail(input.email.clone())
                } else {
                    store_error(e)
                }
            })?
            .ok_or_else(|| AuthorError::Internal("Insert returned no row".to_string()))?;

        tracing::info!(author_id = row.id, email = %row.email, "Created author");
        row.try_into()
    }

    async fn get_by_id(&self, id: i64) -> AuthorResult<Option<Author>> {
        let sql = r#"
            SELECT id, name, email, bio, expertise, embedding::text AS embedding, created_at
            FROM authors
            WHERE id = $1
        "#;

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = AuthorRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(store_error)?;

        row.map(Author::try_from).transpose()
    }

    async fn list_all(&self, limit: u64) -> AuthorResult<Vec<Author>> {
        let sql = r#"
            SELECT id, name, email, bio, expertise, embedding::text AS embedding, created_at
            FROM authors
            ORDER BY id
            LIMIT $1
        "#;

        let stmt =
            Statement::from_sql_and_values(DbBackend::Postgres, sql, [(limit as i64).into()]);

        let rows = AuthorRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn query_by_similarity(
        &self,
        embedding: &[f32],
        top_k: u32,
        threshold: f32,
    ) -> AuthorResult<Vec<SimilarityMatch>> {
        // Ordering by raw distance lets the planner use the cosine index;
        // the secondary id key makes equal-distance results deterministic.
        let sql = r#"
            SELECT
                id,
                name,
                email,
                bio,
                expertise,
                1 - (embedding <=> $1::vector) AS similarity_score
            FROM authors
            WHERE embedding IS NOT NULL
                AND 1 - (embedding <=> $1::vector) > $2
            ORDER BY embedding <=> $1::vector, id
            LIMIT $3
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                vector_literal(embedding).into(),
                (threshold as f64).into(),
                (top_k as i64).into(),
            ],
        );

        let rows = SimilarityRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(SimilarityMatch::from).collect())
    }

    async fn count(&self) -> AuthorResult<u64> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS count FROM authors".to_owned(),
        );

        let row = CountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AuthorError::Internal("Count returned no row".to_string()))?;

        Ok(row.count as u64)
    }

    async fn truncate(&self) -> AuthorResult<()> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            "TRUNCATE TABLE authors RESTART IDENTITY".to_owned(),
        );

        self.db.execute_raw(stmt).await.map_err(store_error)?;

        tracing::info!("Truncated authors table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_literal_format() {
        assert_eq!(vector_literal(&[0.25, -1.0, 3.5]), "[0.25,-1,3.5]");
        assert_eq!(vector_literal(&[]), "[]");
    }

    #[test]
    fn test_parse_vector_round_trip() {
        let original = vec![0.25, -1.0, 3.5];
        let parsed = parse_vector(&vector_literal(&original)).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_vector_tolerates_spaces() {
        let parsed = parse_vector("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(parsed, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_vector_rejects_garbage() {
        assert!(parse_vector("0.1,0.2").is_err());
        assert!(parse_vector("[0.1,abc]").is_err());
    }

    #[test]
    fn test_parse_empty_vector() {
        assert_eq!(parse_vector("[]").unwrap(), Vec::<f32>::new());
    }
}
