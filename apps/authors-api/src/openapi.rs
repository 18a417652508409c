//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Authors API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Authors API",
        version = "0.1.0",
        description = "Author directory with embedding-backed similarity search and grounded Q&A",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/authors", api = domain_authors::ApiDoc)
    ),
    tags(
        (name = "Authors", description = "Author directory, similarity search and Q&A endpoints")
    )
)]
pub struct ApiDoc;
