/// Movie identifiers cross the API boundary as the hex form of the store's ObjectId.
pub type MovieId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
