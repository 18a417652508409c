//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Books API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Books API",
        version = "0.1.0",
        description = "Book catalog with cross-service author lookup",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8081", description = "Local development server")
    ),
    nest(
        (path = "/api/books", api = domain_books::ApiDoc)
    ),
    tags(
        (name = "Books", description = "Book catalog endpoints")
    )
)]
pub struct ApiDoc;
