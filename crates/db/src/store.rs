//! MongoDB connection handle, created once at startup and closed on shutdown.

use bson::{doc, Document};
use mongodb::{Client, Database, IndexModel};

use crate::collection::MongoMovieCollection;
use crate::error::DbError;

/// Database used when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "movie_watchlist";

/// Collection holding one document per movie.
pub const MOVIES_COLLECTION: &str = "movies";

/// Fields that get an ascending single-field index.
const INDEXED_FIELDS: [&str; 4] = ["status", "genre", "created_at", "title"];

/// Connection parameters for [`Store::connect`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017`.
    pub url: String,
    /// Name of the database holding the `movies` collection.
    pub database: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
        }
    }
}

/// An open MongoDB client bound to one database.
#[derive(Clone)]
pub struct Store {
    client: Client,
    database: Database,
}

impl Store {
    /// Create the client and verify the server answers a ping.
    pub async fn connect(config: &StoreConfig) -> Result<Self, DbError> {
        let client = Client::with_uri_str(&config.url).await?;
        let database = client.database(&config.database);
        let store = Self { client, database };
        store.health_check().await?;
        tracing::info!(database = %config.database, "Connected to MongoDB");
        Ok(store)
    }

    /// Ping the server.
    pub async fn health_check(&self) -> Result<(), DbError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the single-field indexes used by listing and stats.
    /// Idempotent: existing indexes with the same keys are left alone.
    pub async fn ensure_indexes(&self) -> Result<(), DbError> {
        let indexes = INDEXED_FIELDS.iter().map(|field| {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            IndexModel::builder().keys(keys).build()
        });
        self.database
            .collection::<Document>(MOVIES_COLLECTION)
            .create_indexes(indexes)
            .await?;
        Ok(())
    }

    /// Handle to the `movies` collection for the repository layer.
    pub fn movies(&self) -> MongoMovieCollection {
        MongoMovieCollection::new(self.database.collection(MOVIES_COLLECTION))
    }

    /// Close every pooled connection. Outstanding handles stop working.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
