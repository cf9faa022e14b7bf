//! Repository layer.
//!
//! Repositories hold an injected collection handle and expose typed async
//! operations. "Not found" is reported as `Ok(None)` / `Ok(false)`.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
