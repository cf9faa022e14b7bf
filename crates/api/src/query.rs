//! Query parameter types for API handlers.

use serde::Deserialize;
use watchlist_core::movie::{MovieFilter, WatchStatus};

use crate::error::AppError;

/// Query parameters for `GET /api/movies` (`?status=&genre=&search=`).
///
/// `status` is kept as a raw string so an unknown value can be reported as
/// a 400 with our own error body instead of axum's rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub status: Option<String>,
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl ListMoviesParams {
    /// Convert into a repository filter. Empty values are treated as absent.
    pub fn into_filter(self) -> Result<MovieFilter, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<WatchStatus>().map_err(|_| {
                AppError::BadRequest(format!(
                    "Invalid status '{raw}': expected 'to_watch' or 'watched'"
                ))
            })?),
        };
        Ok(MovieFilter::new(status, self.genre, self.search))
    }
}
