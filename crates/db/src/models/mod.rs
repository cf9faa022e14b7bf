//! Stored document shapes.
//!
//! Each submodule contains a `Serialize + Deserialize` struct matching the
//! BSON document layout, plus conversions to and from the `watchlist-core`
//! record types.

pub mod movie_document;
