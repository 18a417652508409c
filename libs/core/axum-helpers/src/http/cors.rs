//! CORS layer construction.

use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build a CORS layer restricted to an explicit origin list.
///
/// Origins come from the `CORS_ALLOWED_ORIGIN` environment variable as a
/// comma-separated list, e.g.
/// `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://example.com`.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Permissive CORS layer for local development.
///
/// Allows any origin, method and header. Do not use in production;
/// `create_cors_layer` with an explicit origin list is the deployed path.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer_accepts_origins() {
        let origins = vec!["http://localhost:3000".parse().unwrap()];
        let _layer = create_cors_layer(origins);
    }

    #[test]
    fn test_permissive_layer_builds() {
        let _layer = create_permissive_cors_layer();
    }
}
