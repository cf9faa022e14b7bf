//! Movie watchlist domain types.
//!
//! Zero internal dependencies: the record model, its validation rules and
//! the statistics shape live here so both the data-access layer and the
//! HTTP layer can share them.

pub mod error;
pub mod movie;
pub mod stats;
pub mod types;
