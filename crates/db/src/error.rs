/// Failures raised by the data-access layer.
///
/// "Not found" is never represented here: repositories report it as
/// `Ok(None)` / `Ok(false)` so callers can tell an absent record from an
/// unreachable store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store rejected or failed an operation (I/O, timeout, server error).
    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    /// A stored document does not have the shape of a movie.
    #[error("Malformed movie document: {0}")]
    Decode(#[from] bson::de::Error),

    /// A value could not be converted into a BSON document.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    /// A document written moments ago could not be read back.
    #[error("Movie {id} was not found immediately after being written")]
    Consistency { id: String },
}

impl DbError {
    /// Whether this error signals a store anomaly rather than an ordinary
    /// I/O failure.
    pub fn is_consistency_violation(&self) -> bool {
        matches!(self, DbError::Consistency { .. })
    }
}
