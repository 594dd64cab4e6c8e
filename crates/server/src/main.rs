mod bootstrap;
mod catalog;
mod health;
pub mod pages;

use std::time::Duration;

use anyhow::Result;
use shopfront_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use shopfront_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    // Now bootstrap using the same config we already loaded
    let app = bootstrap::bootstrap_with_config(config).await?;

    health::spawn(
        &app.config.server.bind_address,
        app.config.server.health_check_port,
        app.catalog.clone(),
    )
    .await?;

    let router = pages::router(
        app.catalog.clone(),
        &app.config.site.base_url,
        shopfront_core::PageMotion::default(),
    );

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        catalog_base_url = %app.catalog.base_url(),
        "shopfront-server started"
    );

    let drain_window = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let server = axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown());

    tokio::select! {
        result = server => {
            result?;
            tracing::info!(
                event_name = "system.server.stopping",
                "shopfront-server stopped after draining in-flight requests"
            );
        }
        () = force_shutdown_after(drain_window) => {
            tracing::warn!(
                event_name = "system.server.drain_deadline_exceeded",
                drain_secs = drain_window.as_secs(),
                "drain window elapsed, shutting down with requests still in flight"
            );
        }
    }

    Ok(())
}

async fn wait_for_shutdown() {
    await_shutdown_signal(tokio::signal::ctrl_c()).await;
    tracing::info!(event_name = "system.server.shutdown_signal", "shutdown signal received");
}

async fn force_shutdown_after(drain_window: Duration) {
    await_shutdown_signal(tokio::signal::ctrl_c()).await;
    tokio::time::sleep(drain_window).await;
}

/// Resolves once the signal fires. A failed handler registration is logged
/// and then parks forever, so the server keeps serving instead of tearing
/// itself down without any signal.
async fn await_shutdown_signal(
    signal: impl std::future::Future<Output = std::io::Result<()>>,
) {
    if let Err(error) = signal.await {
        tracing::error!(
            event_name = "system.server.signal_handler_failed",
            error = %error,
            "failed to listen for the shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}
