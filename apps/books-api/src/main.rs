//! Books API - catalog REST server

use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        "Authors directory configured at {}",
        config.authors_api_url
    );

    let api_routes = api::routes(&config);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router());

    info!("Starting Books API on port {}", config.server.port);

    // No backing connections to clean up; plain graceful shutdown is enough
    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Books API shutdown complete");
    Ok(())
}
