use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book entity - a catalog record pointing at an author in the directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Unique identifier, assigned by the repository on creation
    pub id: i64,
    /// Book title
    pub title: String,
    /// Id of the author in the authors directory
    pub author_id: i64,
    /// Optional free-text description
    pub description: Option<String>,
    /// Price in the catalog currency
    pub price: f64,
}

/// DTO for creating a new book
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(range(min = 1))]
    pub author_id: i64,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// DTO for updating an existing book
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub author_id: Option<i64>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Query filters for listing books
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct BookFilter {
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for BookFilter {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Author record as returned by the authors directory service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Book {
    /// Apply updates from an UpdateBook DTO
    pub fn apply_update(&mut self, update: UpdateBook) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author_id) = update.author_id {
            self.author_id = author_id;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update_is_partial() {
        let mut book = Book {
            id: 1,
            title: "Old".to_string(),
            author_id: 2,
            description: None,
            price: 10.0,
        };

        book.apply_update(UpdateBook {
            price: Some(12.5),
            ..Default::default()
        });

        assert_eq!(book.title, "Old");
        assert_eq!(book.author_id, 2);
        assert_eq!(book.price, 12.5);
    }

    #[test]
    fn test_create_book_validation() {
        let invalid = CreateBook {
            title: "".to_string(),
            author_id: 0,
            description: None,
            price: -1.0,
        };
        assert!(invalid.validate().is_err());

        let valid = CreateBook {
            title: "Dune".to_string(),
            author_id: 3,
            description: Some("Epic".to_string()),
            price: 59.9,
        };
        assert!(valid.validate().is_ok());
    }
}
