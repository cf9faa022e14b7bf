//! Movie document model for the `movies` collection.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use serde::{Deserialize, Serialize};
use watchlist_core::movie::{CreateMovie, Movie, WatchStatus};
use watchlist_core::types::Timestamp;

use crate::error::DbError;

/// A document from the `movies` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub personal_rating: Option<i32>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: Timestamp,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: Timestamp,
}

impl MovieDocument {
    /// Build a not-yet-inserted document with both timestamps set to `now`.
    pub fn from_create(input: &CreateMovie, now: Timestamp) -> Self {
        Self {
            id: None,
            title: input.title.clone(),
            genre: input.genre.clone(),
            rating: input.rating,
            status: input.status,
            notes: input.notes.clone(),
            personal_rating: input.personal_rating,
            created_at: now,
            updated_at: now,
        }
    }

    /// Encode into a BSON document ready for insertion.
    pub fn to_document(&self) -> Result<Document, DbError> {
        Ok(bson::to_document(self)?)
    }

    /// Convert to the API shape, projecting `_id` to its hex string.
    pub fn into_movie(self) -> Movie {
        Movie {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: self.title,
            genre: self.genre,
            rating: self.rating,
            status: self.status,
            notes: self.notes,
            personal_rating: self.personal_rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Decode a raw stored document into a normalized [`Movie`].
pub fn decode_movie(document: Document) -> Result<Movie, DbError> {
    let parsed: MovieDocument = bson::from_document(document)?;
    Ok(parsed.into_movie())
}

/// Translate an API identifier into the store's native form.
///
/// Returns `None` for anything that is not a 24-character hex string, so
/// callers can treat a malformed id exactly like an absent record.
pub fn parse_movie_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
