#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use watchlist_api::config::ServerConfig;
use watchlist_api::router::build_app_router;
use watchlist_api::state::AppState;
use watchlist_db::{InMemoryMovieCollection, MovieCollection, MovieRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "mongodb://localhost:27017".to_string(),
        database_name: "movie_watchlist_test".to_string(),
    }
}

/// Build the full application router over the given collection.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app_with(collection: Arc<dyn MovieCollection>) -> Router {
    let config = test_config();
    let state = AppState {
        movies: MovieRepo::new(collection),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build a router backed by a fresh, shared in-memory collection.
///
/// The router is cloned per request, so every clone sees the same data.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(InMemoryMovieCollection::new()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a movie through the API and return its id.
pub async fn create_movie(app: &Router, body: serde_json::Value) -> String {
    let response = post_json(app, "/api/movies", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}
