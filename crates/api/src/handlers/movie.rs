//! Handlers for the movie resource.
//!
//! Bodies are taken as raw bytes, and path rejections are caught, so a
//! missing or malformed request is answered with the standard error envelope
//! rather than the extractor's default plain-text rejection.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::Envelope;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v0.1/movie
pub async fn create(State(state): State<AppState>, body: Bytes) -> AppResult<impl IntoResponse> {
    let payload = require_body(&body, "You must provide a body to create!")?;
    let id = state.movies.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(Envelope::id(id, "Movie created!"))))
}

/// PUT /api/v0.1/movie/{id}
///
/// Partial update: only fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let payload = require_body(&body, "You must provide a body to update!")?;
    let id = state.movies.update(&id, &payload).await?;
    Ok(Json(Envelope::id(id, "Movie updated!")))
}

/// DELETE /api/v0.1/movie/{id}
///
/// Responds with the removed record.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let movie = state.movies.delete(&id).await?;
    Ok(Json(Envelope::data(movie).with_message("Movie deleted!")))
}

/// GET /api/v0.1/movie/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id?;
    let movie = state.movies.find_by_id(&id).await?;
    Ok(Json(Envelope::data(movie)))
}

/// GET /api/v0.1/movies
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let movies = state.movies.find_all().await?;
    Ok(Json(Envelope::data(movies)))
}

/// POST /api/v0.1/movies/top
///
/// Body `{ "limit": n }` is optional; see
/// [`cinema_core::validation::top_rated_limit`].
pub async fn top_rated(State(state): State<AppState>, body: Bytes) -> AppResult<impl IntoResponse> {
    let payload = parse_json(&body)?.unwrap_or(Value::Null);
    let movies = state.movies.top_rated(&payload).await?;
    Ok(Json(Envelope::data(movies)))
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

/// Parse a JSON body. Empty, whitespace-only and `null` bodies count as
/// absent.
fn parse_json(body: &Bytes) -> AppResult<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {e}")))?;

    Ok((!value.is_null()).then_some(value))
}

fn require_body(body: &Bytes, missing: &'static str) -> AppResult<Value> {
    parse_json(body)?.ok_or(AppError::MissingBody(missing))
}
