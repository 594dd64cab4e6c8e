use std::time::Duration;

use shopfront_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogClient;

pub struct Application {
    pub config: AppConfig,
    pub catalog: CatalogClient,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let catalog = CatalogClient::new(
        &config.catalog.base_url,
        Duration::from_secs(config.catalog.timeout_secs),
    )
    .map_err(BootstrapError::HttpClient)?;
    info!(
        event_name = "system.bootstrap.catalog_client_ready",
        catalog_base_url = %catalog.base_url(),
        "catalog http client constructed"
    );

    Ok(Application { config, catalog })
}
