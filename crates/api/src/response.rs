//! Success envelope for API handlers.
//!
//! Every movie endpoint answers with `{ "success": true, ... }` plus whichever
//! of `data`, `id` and `message` the operation produces. Failures are shaped
//! by [`crate::error::AppError`] with the same `success` flag set to `false`.

use cinema_core::types::MovieId;
use serde::Serialize;

/// Standard `{ "success": true, "data"?, "id"?, "message"? }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Envelope::data(movies)))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            id: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Envelope<()> {
    /// Successful mutation acknowledged by the id of the affected record.
    pub fn id(id: MovieId, message: &'static str) -> Self {
        Self {
            success: true,
            data: None,
            id: Some(id),
            message: Some(message),
        }
    }
}
