//! Repository for the `movies` collection.

use std::sync::Arc;

use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::Utc;
use watchlist_core::movie::{CreateMovie, Movie, MovieFilter, UpdateMovie, WatchStatus};
use watchlist_core::stats::{average_rating, GenreCount, MovieStats};

use crate::collection::MovieCollection;
use crate::error::DbError;
use crate::models::movie_document::{decode_movie, parse_movie_id, MovieDocument};
use crate::query;

/// Genre label used when a stored genre is not a string.
const UNKNOWN_GENRE: &str = "Unknown";

/// Provides CRUD operations and summary statistics for movies.
#[derive(Clone)]
pub struct MovieRepo {
    collection: Arc<dyn MovieCollection>,
}

impl MovieRepo {
    pub fn new(collection: Arc<dyn MovieCollection>) -> Self {
        Self { collection }
    }

    /// List movies matching every present filter field, newest first.
    pub async fn list(&self, filter: &MovieFilter) -> Result<Vec<Movie>, DbError> {
        let documents = self
            .collection
            .find(query::list_filter(filter), query::newest_first())
            .await?;
        documents.into_iter().map(decode_movie).collect()
    }

    /// Find a movie by its string id. A malformed id is simply not found.
    pub async fn get(&self, id: &str) -> Result<Option<Movie>, DbError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        self.find(oid).await
    }

    /// Insert a new movie and return it as stored.
    pub async fn create(&self, input: &CreateMovie) -> Result<Movie, DbError> {
        let document = MovieDocument::from_create(input, Utc::now()).to_document()?;
        let oid = self.collection.insert_one(document).await?;
        match self.find(oid).await? {
            Some(movie) => {
                tracing::debug!(movie_id = %movie.id, "Movie created");
                Ok(movie)
            }
            None => {
                tracing::error!(movie_id = %oid, "Inserted movie could not be read back");
                Err(DbError::Consistency { id: oid.to_hex() })
            }
        }
    }

    /// Apply the present fields of `patch` and refresh `updated_at`.
    ///
    /// Returns `None` if the id is malformed or no movie has it, including
    /// when the movie is deleted between the write and the re-read.
    pub async fn update(&self, id: &str, patch: &UpdateMovie) -> Result<Option<Movie>, DbError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let matched = self
            .collection
            .update_by_id(oid, query::update_set(patch, Utc::now()))
            .await?;
        if matched == 0 {
            return Ok(None);
        }
        self.find(oid).await
    }

    /// Delete a movie by id. Returns `true` if a movie was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.collection.delete_by_id(oid).await?;
        Ok(deleted > 0)
    }

    /// Number of movies on the watchlist.
    pub async fn count(&self) -> Result<u64, DbError> {
        self.collection.count(Document::new()).await
    }

    /// Summary statistics over the whole collection.
    pub async fn stats(&self) -> Result<MovieStats, DbError> {
        let total_movies = self.count().await?;
        if total_movies == 0 {
            return Ok(MovieStats::empty());
        }

        let to_watch_count = self
            .collection
            .count(query::status_filter(WatchStatus::ToWatch))
            .await?;
        let watched_count = self
            .collection
            .count(query::status_filter(WatchStatus::Watched))
            .await?;

        let ratings = self
            .collection
            .aggregate(query::personal_rating_pipeline())
            .await?;
        let (rated_movies, rating_total) = ratings
            .first()
            .map(|row| {
                (
                    non_negative(query::as_i64(row.get("rated"))),
                    query::as_i64(row.get("total")),
                )
            })
            .unwrap_or((0, 0));

        let genres = self
            .collection
            .aggregate(query::genre_pipeline())
            .await?
            .iter()
            .map(genre_count)
            .collect();

        Ok(MovieStats {
            total_movies,
            to_watch_count,
            watching_count: 0,
            watched_count,
            avg_personal_rating: average_rating(rating_total, rated_movies),
            rated_movies,
            genres,
        })
    }

    async fn find(&self, oid: ObjectId) -> Result<Option<Movie>, DbError> {
        self.collection
            .find_by_id(oid)
            .await?
            .map(decode_movie)
            .transpose()
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    let parsed = parse_movie_id(id);
    if parsed.is_none() {
        tracing::debug!(movie_id = id, "Malformed movie id treated as not found");
    }
    parsed
}

fn genre_count(row: &Document) -> GenreCount {
    let genre = match row.get("_id") {
        Some(Bson::String(genre)) => genre.clone(),
        _ => UNKNOWN_GENRE.to_string(),
    };
    GenreCount {
        genre,
        count: non_negative(query::as_i64(row.get("count"))),
    }
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
