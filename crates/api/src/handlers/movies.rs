//! Handlers for the `/movies` resource.
//!
//! Each handler performs exactly one repository operation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use watchlist_core::error::CoreError;
use watchlist_core::movie::{validate_create, validate_update, CreateMovie, Movie, UpdateMovie};
use watchlist_core::stats::MovieStats;

use crate::error::{AppError, AppResult};
use crate::query::ListMoviesParams;
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /api/movies
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let filter = params.into_filter()?;
    let movies = state.movies.list(&filter).await?;
    Ok(Json(movies))
}

/// POST /api/movies
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    validate_create(&input)?;
    let movie = state.movies.create(&input).await?;
    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie added to watchlist");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let movie = state.movies.get(&id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// PUT /api/movies/{id}
///
/// Partial update: only fields present (and non-null) in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    validate_update(&input)?;
    let movie = state
        .movies
        .update(&id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// DELETE /api/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if state.movies.delete(&id).await? {
        tracing::info!(movie_id = %id, "Movie removed from watchlist");
        Ok(Json(DeleteResponse {
            message: "Movie deleted successfully",
        }))
    } else {
        Err(not_found(id))
    }
}

/// GET /api/movies/stats/summary
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<MovieStats>> {
    let stats = state.movies.stats().await?;
    Ok(Json(stats))
}

fn not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}
