pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                          list, create
/// /movies/stats/summary            stats
/// /movies/{id}                     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movies", movies::router())
}
