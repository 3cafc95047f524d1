// Liveness endpoint for hosting-platform health probes.
// Only spawned when a hosting marker or PORT is present in the environment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
struct HealthState {
    ready: Arc<AtomicBool>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    bot_ready: bool,
}

fn router(ready: Arc<AtomicBool>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { ready })
}

/// Bind the listener, then serve probes in the background
pub async fn spawn(port: u16, ready: Arc<AtomicBool>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Health check server starting on port {}", port);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(ready)).await {
            error!("Health check server terminated unexpectedly: {:?}", e);
        }
    });

    Ok(())
}

async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            bot_ready: state.ready.load(Ordering::Relaxed),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_not_ready_before_startup_completes() {
        let ready = Arc::new(AtomicBool::new(false));
        let (status, Json(payload)) = health(State(HealthState { ready })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "healthy");
        assert!(!payload.bot_ready);
    }

    #[tokio::test]
    async fn health_reports_ready_once_flag_is_set() {
        let ready = Arc::new(AtomicBool::new(false));
        ready.store(true, Ordering::Relaxed);
        let (status, Json(payload)) = health(State(HealthState { ready })).await;

        assert_eq!(status, StatusCode::OK);
        assert!(payload.bot_ready);
    }
}
