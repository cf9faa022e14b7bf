//! Data access for the movie watchlist.
//!
//! [`MovieRepo`] talks to the store only through the [`MovieCollection`]
//! seam, so the same repository runs against MongoDB in production and
//! against `InMemoryMovieCollection` in tests (`test-utils` feature).

pub mod collection;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod models;
pub mod query;
pub mod repositories;
pub mod store;

pub use collection::{MongoMovieCollection, MovieCollection};
pub use error::DbError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryMovieCollection;
pub use repositories::MovieRepo;
pub use store::{Store, StoreConfig, DEFAULT_DATABASE_NAME, MOVIES_COLLECTION};
