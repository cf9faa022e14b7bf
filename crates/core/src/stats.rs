//! Watchlist summary statistics, computed on demand and never persisted.

use serde::{Deserialize, Serialize};

/// Number of movies sharing one exact genre string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u64,
}

/// Dashboard summary over the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub total_movies: u64,
    pub to_watch_count: u64,
    /// Always zero: there is no "watching" status yet. Kept so the web
    /// client's stats card keeps its shape.
    pub watching_count: u64,
    pub watched_count: u64,
    /// Mean of every non-null personal rating; `None` when nothing is rated.
    pub avg_personal_rating: Option<f64>,
    /// Number of movies with a personal rating.
    pub rated_movies: u64,
    /// Ordered by count descending, then genre name ascending.
    pub genres: Vec<GenreCount>,
}

impl MovieStats {
    /// Statistics for a collection with no movies.
    pub fn empty() -> Self {
        Self {
            total_movies: 0,
            to_watch_count: 0,
            watching_count: 0,
            watched_count: 0,
            avg_personal_rating: None,
            rated_movies: 0,
            genres: Vec::new(),
        }
    }
}

/// Arithmetic mean of `count` ratings summing to `sum`.
pub fn average_rating(sum: i64, count: u64) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}
