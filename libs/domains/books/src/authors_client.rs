use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{BookError, BookResult};
use crate::models::AuthorRef;

/// Lookup of author records in the authors directory service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Fetch an author by id; `None` when the directory has no such record.
    async fn get_author(&self, id: i64) -> BookResult<Option<AuthorRef>>;
}

/// HTTP client for the authors directory service.
#[derive(Clone)]
pub struct HttpAuthorDirectory {
    client: Client,
    base_url: String,
}

impl HttpAuthorDirectory {
    /// `base_url` is the authors service root, e.g. `http://localhost:8080`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthorDirectory for HttpAuthorDirectory {
    async fn get_author(&self, id: i64) -> BookResult<Option<AuthorRef>> {
        let url = format!("{}/api/authors/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BookError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let author = response
                    .json::<AuthorRef>()
                    .await
                    .map_err(|e| BookError::Upstream(e.to_string()))?;
                Ok(Some(author))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BookError::Upstream(format!(
                    "Authors service returned {}: {}",
                    status, body
                )))
            }
        }
    }
}
