use async_trait::async_trait;
use chrono::Utc;
use cinema_core::movie::{Movie, NewMovie};
use cinema_core::types::MovieId;
use tokio::sync::RwLock;

use super::{MovieStore, StoreError};

/// [`MovieStore`] kept in process memory, in insertion order.
///
/// Every mutation takes the write lock for its whole read-check-write
/// sequence, so the duplicate check on insert cannot race.
#[derive(Debug, Default)]
pub struct MemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;

        if movies
            .iter()
            .any(|m| m.title == movie.title && m.director == movie.director)
        {
            return Err(StoreError::UniqueViolation {
                title: movie.title,
                director: movie.director,
            });
        }

        let now = Utc::now();
        let stored = Movie {
            id: MovieId::now_v7(),
            title: movie.title,
            synopsis: movie.synopsis,
            director: movie.director,
            writers: movie.writers,
            stars: movie.stars,
            rating: movie.rating,
            showtimes: movie.showtimes,
            created_at: now,
            updated_at: now,
        };
        movies.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_title_and_director(
        &self,
        title: &str,
        director: &str,
    ) -> Result<Vec<Movie>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .filter(|m| m.title == title && m.director == director)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.movies.read().await.clone())
    }

    async fn top_rated(&self, limit: usize) -> Result<Vec<Movie>, StoreError> {
        let mut ranked = self.movies.read().await.clone();
        // Stable sort: equal ratings stay in insertion order.
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn replace(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.movies.write().await;
        let Some(slot) = movies.iter_mut().find(|m| m.id == movie.id) else {
            return Ok(None);
        };

        *slot = Movie {
            created_at: slot.created_at,
            updated_at: Utc::now(),
            ..movie.clone()
        };
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.movies.write().await;
        Ok(movies
            .iter()
            .position(|m| m.id == id)
            .map(|index| movies.remove(index)))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.movies.read().await.len())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
