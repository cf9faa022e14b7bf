use watchlist_db::{StoreConfig, DEFAULT_DATABASE_NAME};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`
    /// (or `FRONTEND_URL`) env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// MongoDB connection string.
    pub database_url: String,
    /// Database holding the `movies` collection.
    pub database_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                      |
    /// |------------------------|----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                    |
    /// | `PORT`                 | `5000`                                       |
    /// | `CORS_ORIGINS`         | `FRONTEND_URL`, else `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                         |
    /// | `DATABASE_URL`         | `mongodb://localhost:27017/movie_watchlist`  |
    /// | `DATABASE_NAME`        | `movie_watchlist`                            |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, applying the defaults
    /// documented on [`ServerConfig::from_env`].
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = get("PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &get("CORS_ORIGINS")
                .or_else(|| get("FRONTEND_URL"))
                .unwrap_or_else(|| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = get("DATABASE_URL")
            .unwrap_or_else(|| "mongodb://localhost:27017/movie_watchlist".into());

        let database_name = get("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            database_name,
        }
    }

    /// Connection parameters for the document store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.database_url.clone(), self.database_name.clone())
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
