//! Movie record model: watch status, persisted record, create/update DTOs
//! and list filters.
//!
//! Field constraints are declared with `validator` attributes on the DTOs
//! and checked through [`validate_create`] / [`validate_update`] before any
//! input reaches the data-access layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::{MovieId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a movie title in characters.
pub const MAX_TITLE_LENGTH: u64 = 255;

/// Maximum length of a genre name in characters.
pub const MAX_GENRE_LENGTH: u64 = 100;

/// Maximum length of personal notes in characters.
pub const MAX_NOTES_LENGTH: u64 = 1000;

/// Lowest accepted rating (both IMDb-style and personal).
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating (both IMDb-style and personal).
pub const MAX_RATING: i32 = 10;

// ---------------------------------------------------------------------------
// Watch status
// ---------------------------------------------------------------------------

/// Where a movie sits on the watchlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    ToWatch,
    Watched,
}

impl WatchStatus {
    /// The value stored in the `status` field of a movie document.
    pub fn as_str(self) -> &'static str {
        match self {
            WatchStatus::ToWatch => "to_watch",
            WatchStatus::Watched => "watched",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_watch" => Ok(WatchStatus::ToWatch),
            "watched" => Ok(WatchStatus::Watched),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: to_watch, watched"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Records and DTOs
// ---------------------------------------------------------------------------

/// A stored movie as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    /// External (IMDb-style) rating.
    pub rating: Option<i32>,
    pub status: WatchStatus,
    pub notes: Option<String>,
    pub personal_rating: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a movie to the watchlist.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,
    #[validate(length(min = 1, max = MAX_GENRE_LENGTH))]
    pub genre: String,
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub rating: Option<i32>,
    #[serde(default)]
    pub status: WatchStatus,
    #[validate(length(max = MAX_NOTES_LENGTH))]
    pub notes: Option<String>,
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub personal_rating: Option<i32>,
}

/// DTO for a partial update. Every field is optional.
///
/// A field sent as `null` deserializes to `None` and is indistinguishable
/// from an omitted field: neither clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = MAX_GENRE_LENGTH))]
    pub genre: Option<String>,
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub rating: Option<i32>,
    pub status: Option<WatchStatus>,
    #[validate(length(max = MAX_NOTES_LENGTH))]
    pub notes: Option<String>,
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub personal_rating: Option<i32>,
}

/// Conjunctive list filter. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub status: Option<WatchStatus>,
    pub genre: Option<String>,
    /// Case-insensitive substring matched against title or notes.
    pub search: Option<String>,
}

impl MovieFilter {
    /// Build a filter, treating empty strings as "not provided".
    pub fn new(status: Option<WatchStatus>, genre: Option<String>, search: Option<String>) -> Self {
        Self {
            status,
            genre: genre.filter(|g| !g.is_empty()),
            search: search.filter(|s| !s.is_empty()),
        }
    }

    /// Whether this filter matches every movie.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.genre.is_none() && self.search.is_none()
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a create payload against the model constraints.
pub fn validate_create(input: &CreateMovie) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Validate an update payload. Only fields that are present are checked.
pub fn validate_update(input: &UpdateMovie) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Flatten field errors into a stable, human-readable message.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| format!("{field}: {}", reason(e)))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Render one constraint failure from the bounds validator attaches to it.
fn reason(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let min = error.params.get("min");
    let max = error.params.get("max");
    match (error.code.as_ref(), min, max) {
        ("length", Some(min), Some(max)) => format!("must be between {min} and {max} characters"),
        ("length", None, Some(max)) => format!("must be at most {max} characters"),
        ("range", Some(min), Some(max)) => format!("must be between {min} and {max}"),
        (code, _, _) => code.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
