use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinema_core::error::{field_messages, CoreError};
use cinema_db::StoreError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the `{ success: false, error, message, code }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinema_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request carried no payload. Holds the client-facing message.
    #[error("Missing body: {0}")]
    MissingBody(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Path parameters that cannot be decoded (e.g. percent-encoded bytes that
/// are not UTF-8) are answered with the envelope like every other failure.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, message): (StatusCode, &str, Value, String) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    Value::String(format!("{entity} not found")),
                    format!("{entity} not found!"),
                ),
                CoreError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    Value::Object(field_messages(errors)),
                    core.to_string(),
                ),
                CoreError::Duplicate { entity, key } => (
                    StatusCode::BAD_REQUEST,
                    "DUPLICATE_RECORD",
                    Value::String(format!("{entity} {key} already exists")),
                    format!("{entity} already exists!"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        Value::String("An internal error occurred".into()),
                        "An internal error occurred".into(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::MissingBody(msg) => (
                StatusCode::BAD_REQUEST,
                "MISSING_BODY",
                Value::String((*msg).to_string()),
                "Request body is required".into(),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                Value::String(msg.clone()),
                msg.clone(),
            ),
        };

        let body = json!({
            "success": false,
            "error": error,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into status, code, error and message.
///
/// - Unique violations map to 400 `DUPLICATE_RECORD`.
/// - Everything else maps to 400 `STORE_FAILURE`. The driver error is logged,
///   never returned to the client.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, Value, String) {
    match err {
        StoreError::UniqueViolation { .. } => (
            StatusCode::BAD_REQUEST,
            "DUPLICATE_RECORD",
            Value::String(err.to_string()),
            "Movie already exists!".into(),
        ),
        StoreError::Database(_) | StoreError::Migration(_) => {
            tracing::error!(error = %err, "Record store error");
            (
                StatusCode::BAD_REQUEST,
                "STORE_FAILURE",
                Value::String("The record store could not complete the request".into()),
                "Store operation failed!".into(),
            )
        }
    }
}

