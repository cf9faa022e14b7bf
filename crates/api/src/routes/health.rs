use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "movie-watchlist-backend";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Root response pointing clients at the health endpoint.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
}

/// GET /health -- liveness only; does not touch the store.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /
async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Movie Watchlist API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
    })
}

/// Mount root-level routes (NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
}
