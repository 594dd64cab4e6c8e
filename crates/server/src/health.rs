use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::catalog::CatalogClient;

#[derive(Clone)]
pub struct HealthState {
    catalog: CatalogClient,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog: CatalogClient) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog })
}

pub async fn spawn(bind_address: &str, port: u16, catalog: CatalogClient) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.health.start",
        bind_address = %address,
        "health endpoint started"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(catalog)).await {
            error!(
                event_name = "system.health.error",
                error = %error,
                "health endpoint server terminated unexpectedly"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.catalog).await;
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "shopfront-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn catalog_check(catalog: &CatalogClient) -> HealthCheck {
    match catalog.probe().await {
        Ok(()) => HealthCheck { status: "ready", detail: "catalog origin reachable".to_string() },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("catalog probe failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

    use crate::catalog::CatalogClient;
    use crate::health::{health, HealthState};

    async fn spawn_origin() -> String {
        let app = Router::new().route("/", get(|| async { "ok" }));
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("stub should bind");
        let addr = listener.local_addr().expect("stub should expose local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    async fn unreachable_base_url() -> String {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("listener should bind");
        let addr = listener.local_addr().expect("listener should expose local addr");
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn health_returns_ready_when_catalog_is_reachable() {
        let base_url = spawn_origin().await;
        let catalog = CatalogClient::new(&base_url, Duration::from_secs(2))
            .expect("client should build");

        let (status, Json(payload)) = health(State(HealthState { catalog })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_when_catalog_is_unreachable() {
        let base_url = unreachable_base_url().await;
        let catalog = CatalogClient::new(&base_url, Duration::from_secs(2))
            .expect("client should build");

        let (status, Json(payload)) = health(State(HealthState { catalog })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.catalog.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
