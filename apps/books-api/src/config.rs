//! Configuration for the Books API

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Root URL of the authors directory service
    pub authors_api_url: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let authors_api_url = env_or_default("AUTHORS_API_URL", "http://localhost:8080");

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            authors_api_url,
        })
    }
}
