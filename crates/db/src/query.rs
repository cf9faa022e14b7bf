//! Builders for the filter, update and aggregation documents sent to the
//! `movies` collection.
//!
//! Kept free of I/O so the exact query shapes can be unit tested.

use bson::{doc, Bson, Document};
use watchlist_core::movie::{MovieFilter, UpdateMovie, WatchStatus};
use watchlist_core::types::Timestamp;

/// Conjunctive filter for listing movies. An empty filter matches everything.
///
/// The search term is escaped, so it matches as a literal, case-insensitive
/// substring of either the title or the notes.
pub fn list_filter(filter: &MovieFilter) -> Document {
    let mut query = Document::new();
    if let Some(status) = filter.status {
        query.insert("status", status.as_str());
    }
    if let Some(genre) = &filter.genre {
        query.insert("genre", genre.as_str());
    }
    if let Some(search) = &filter.search {
        let pattern = regex::escape(search);
        query.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": pattern.clone(), "$options": "i" } },
                doc! { "notes": { "$regex": pattern, "$options": "i" } },
            ],
        );
    }
    query
}

/// Sort specification for listing: newest first.
pub fn newest_first() -> Document {
    doc! { "created_at": -1 }
}

/// Filter matching every movie with the given status.
pub fn status_filter(status: WatchStatus) -> Document {
    doc! { "status": status.as_str() }
}

/// `$set` contents for a partial update.
///
/// Only fields present in the patch are written; `updated_at` is always
/// refreshed.
pub fn update_set(patch: &UpdateMovie, now: Timestamp) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(genre) = &patch.genre {
        set.insert("genre", genre.as_str());
    }
    if let Some(rating) = patch.rating {
        set.insert("rating", rating);
    }
    if let Some(status) = patch.status {
        set.insert("status", status.as_str());
    }
    if let Some(notes) = &patch.notes {
        set.insert("notes", notes.as_str());
    }
    if let Some(personal_rating) = patch.personal_rating {
        set.insert("personal_rating", personal_rating);
    }
    set.insert("updated_at", bson::DateTime::from_chrono(now));
    set
}

/// Aggregation producing a single `{ rated, total }` row over every movie
/// with a non-null personal rating. Produces no rows when nothing is rated.
pub fn personal_rating_pipeline() -> Vec<Document> {
    vec![
        doc! { "$match": { "personal_rating": { "$ne": null } } },
        doc! {
            "$group": {
                "_id": null,
                "rated": { "$sum": 1 },
                "total": { "$sum": "$personal_rating" },
            }
        },
    ]
}

/// Aggregation producing `{ _id: genre, count }` rows, largest count first
/// and ties ordered by genre name.
pub fn genre_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$genre", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1, "_id": 1 } },
    ]
}

/// Read an aggregation number regardless of the integer width the store chose.
pub fn as_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}
