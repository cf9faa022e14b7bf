use std::sync::Arc;

use watchlist_db::MovieRepo;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Movie repository over the configured collection.
    pub movies: MovieRepo,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
