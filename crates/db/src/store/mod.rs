//! Persistence port for movies and its implementations.

use async_trait::async_trait;
use cinema_core::movie::{Movie, NewMovie};
use cinema_core::types::MovieId;

mod memory;
mod postgres;

pub use memory::MemoryMovieStore;
pub use postgres::PgMovieStore;

/// Errors raised by a [`MovieStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another movie already holds this title and director.
    #[error("Duplicate movie: \"{title}\" directed by {director}")]
    UniqueViolation { title: String, director: String },

    /// Any failure reported by the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The schema could not be brought up to date.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage operations the movie service needs.
///
/// Implementations assign ids and timestamps, and must make `insert`,
/// `replace` and `delete` atomic per record. Object-safe so the service can
/// hold an `Arc<dyn MovieStore>`.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new movie with a fresh id and timestamps.
    ///
    /// Fails with [`StoreError::UniqueViolation`] if a movie with the same
    /// title and director exists at insert time.
    async fn insert(&self, movie: NewMovie) -> Result<Movie, StoreError>;

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError>;

    async fn find_by_title_and_director(
        &self,
        title: &str,
        director: &str,
    ) -> Result<Vec<Movie>, StoreError>;

    /// Every movie, in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;

    /// Up to `limit` movies by descending rating; ties keep insertion order.
    async fn top_rated(&self, limit: usize) -> Result<Vec<Movie>, StoreError>;

    /// Overwrite the stored record with the same id and refresh `updated_at`.
    /// Returns `None` if the record no longer exists.
    async fn replace(&self, movie: &Movie) -> Result<Option<Movie>, StoreError>;

    /// Remove a record, returning what was removed.
    async fn delete(&self, id: MovieId) -> Result<Option<Movie>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
