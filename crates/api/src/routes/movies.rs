//! Route definitions for the `/movies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list (?status=&genre=&search=)
/// POST   /                  -> create
/// GET    /stats/summary     -> stats
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list).post(movies::create))
        .route("/stats/summary", get(movies::stats))
        .route(
            "/{id}",
            get(movies::get_by_id)
                .put(movies::update)
                .delete(movies::delete),
        )
}
