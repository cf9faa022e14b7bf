use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use watchlist_core::error::CoreError;
use watchlist_db::DbError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `watchlist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A data-access error from `watchlist_db`.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal failure outside the store, such as a panicking handler.
    /// The message is logged and never sent to the client.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_db_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Log a data-access error and map it to a sanitized 500.
///
/// Store anomalies (a write that cannot be read back) are logged apart from
/// ordinary I/O failures so they can be alerted on separately.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    if err.is_consistency_violation() {
        tracing::error!(error = %err, anomaly = true, "Store consistency violation");
    } else {
        tracing::error!(error = %err, "Database error");
    }
    internal()
}
