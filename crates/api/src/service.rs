//! Movie service: the five catalog operations plus the top-rated listing.
//!
//! Validates loose request bodies, enforces duplicate detection on create,
//! merges partial updates, and maps store outcomes onto [`AppError`]. Every
//! call yields exactly one outcome.

use std::sync::Arc;

use cinema_core::error::CoreError;
use cinema_core::movie::Movie;
use cinema_core::types::MovieId;
use cinema_core::validation::{
    top_rated_limit, validate_movie, validate_movie_patch, validate_new_movie,
};
use cinema_db::{MovieStore, StoreError};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Movie";

/// Handle on the record store with the movie business rules on top.
#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn MovieStore>,
}

impl MovieService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Create a movie from a request body, returning the new id.
    ///
    /// Rejects the body if a movie with the same title and director exists;
    /// nothing is written in that case.
    #[instrument(name = "cinema.movies.create", skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> AppResult<MovieId> {
        let new_movie = validate_new_movie(payload).inspect_err(|err| {
            warn!(error = %err, "Rejected movie create");
        })?;

        let existing = self
            .store
            .find_by_title_and_director(&new_movie.title, &new_movie.director)
            .await?;
        if !existing.is_empty() {
            warn!(title = %new_movie.title, director = %new_movie.director, "Duplicate movie");
            return Err(CoreError::Duplicate {
                entity: ENTITY,
                key: new_movie.identity(),
            }
            .into());
        }

        let key = new_movie.identity();
        let movie = self
            .store
            .insert(new_movie)
            .await
            .map_err(|err| -> AppError {
                match err {
                    // Lost the race against a concurrent create of the same pair.
                    StoreError::UniqueViolation { .. } => {
                        CoreError::Duplicate { entity: ENTITY, key }.into()
                    }
                    other => other.into(),
                }
            })?;

        info!(movie_id = %movie.id, title = %movie.title, "Movie created");
        Ok(movie.id)
    }

    /// Fetch one movie.
    #[instrument(name = "cinema.movies.find_by_id", skip(self))]
    pub async fn find_by_id(&self, raw_id: &str) -> AppResult<Movie> {
        let id = parse_id(raw_id)?;
        let movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        debug!("Movie found");
        Ok(movie)
    }

    /// Every movie in insertion order. An empty catalog is reported as
    /// not found.
    #[instrument(name = "cinema.movies.find_all", skip(self))]
    pub async fn find_all(&self) -> AppResult<Vec<Movie>> {
        let movies = self.store.list().await?;
        if movies.is_empty() {
            return Err(CoreError::NotFound {
                entity: ENTITY,
                id: "*".to_string(),
            }
            .into());
        }
        debug!(count = movies.len(), "Movies listed");
        Ok(movies)
    }

    /// Apply a partial update. Fields absent from the body keep their stored
    /// value; the merged record is validated again before it is written. A
    /// body with no movie fields leaves the record, `updated_at` included,
    /// untouched.
    #[instrument(name = "cinema.movies.update", skip(self, payload))]
    pub async fn update(&self, raw_id: &str, payload: &Value) -> AppResult<MovieId> {
        let id = parse_id(raw_id)?;
        let patch = validate_movie_patch(payload).inspect_err(|err| {
            warn!(error = %err, "Rejected movie update");
        })?;

        let mut movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;

        if patch.is_empty() {
            debug!("Empty update, nothing to write");
            return Ok(movie.id);
        }

        patch.apply(&mut movie);
        validate_movie(&movie)?;

        let updated = self
            .store
            .replace(&movie)
            .await?
            .ok_or_else(|| not_found(raw_id))?;

        info!(movie_id = %updated.id, "Movie updated");
        Ok(updated.id)
    }

    /// Remove a movie, returning the removed record.
    #[instrument(name = "cinema.movies.delete", skip(self))]
    pub async fn delete(&self, raw_id: &str) -> AppResult<Movie> {
        let id = parse_id(raw_id)?;
        let movie = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| not_found(raw_id))?;
        info!(movie_id = %movie.id, title = %movie.title, "Movie deleted");
        Ok(movie)
    }

    /// The highest-rated movies, limited by the body's `limit`.
    #[instrument(name = "cinema.movies.top_rated", skip(self, payload))]
    pub async fn top_rated(&self, payload: &Value) -> AppResult<Vec<Movie>> {
        let limit = top_rated_limit(payload);
        let movies = self.store.top_rated(limit).await?;
        debug!(limit, count = movies.len(), "Top rated movies listed");
        Ok(movies)
    }

    /// Whether the record store answers.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

/// Ids that are not well-formed cannot match any record.
fn parse_id(raw: &str) -> Result<MovieId, CoreError> {
    MovieId::parse_str(raw.trim()).map_err(|_| not_found(raw))
}

fn not_found(raw_id: &str) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY,
        id: raw_id.to_string(),
    }
}
