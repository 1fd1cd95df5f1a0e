//! HTTP exposure of the health registry.
//!
//! # Routes
//! - `GET /health`: composite report, 200 when UP, 503 when DOWN
//! - `GET /health/{component}`: single report, 200/503, 404 for unknown names

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ListenerConfig;
use crate::health::{HealthRegistry, Status};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<HealthRegistry>,
}

/// HTTP server for the health endpoint.
pub struct HealthServer {
    router: Router,
}

impl HealthServer {
    /// Build the router over `registry` with the listener's timeout.
    pub fn new(registry: Arc<HealthRegistry>, config: &ListenerConfig) -> Self {
        let state = AppState { registry };
        Self {
            router: Self::build_router(config, state),
        }
    }

    #[allow(deprecated)]
    fn build_router(config: &ListenerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(composite_health))
            .route("/health/{component}", get(component_health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Health endpoint listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn http_status(status: Status) -> StatusCode {
    match status {
        Status::Up => StatusCode::OK,
        Status::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn composite_health(State(state): State<AppState>) -> Response {
    let report = state.registry.check_all().await;
    (http_status(report.status()), Json(report)).into_response()
}

async fn component_health(
    State(state): State<AppState>,
    Path(component): Path<String>,
) -> Response {
    match state.registry.check_one(&component).await {
        Some(report) => (http_status(report.status()), Json(report)).into_response(),
        None => {
            tracing::debug!(component = %component, "Unknown health component requested");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": format!("unknown component '{}'", component)
                })),
            )
                .into_response()
        }
    }
}
