use std::sync::Arc;

use async_trait::async_trait;
use cinema_core::movie::{Movie, NewMovie};
use cinema_core::types::MovieId;
use tokio::sync::OnceCell;

use super::{MovieStore, StoreError};
use crate::repositories::MovieRepo;
use crate::DbPool;

/// [`MovieStore`] backed by the `movies` table.
///
/// The embedded migrations run before the first statement that reaches the
/// database. A failed attempt is retried on the next call, so a server that
/// started while the database was down picks up the schema once it is back.
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: DbPool,
    schema: Arc<OnceCell<()>>,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// Apply pending migrations unless this store already has.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| async {
                crate::run_migrations(&self.pool).await?;
                tracing::info!("Database migrations applied");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn insert(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        self.ensure_schema().await?;
        MovieRepo::create(&self.pool, MovieId::now_v7(), &movie)
            .await?
            .ok_or(StoreError::UniqueViolation {
                title: movie.title,
                director: movie.director,
            })
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        self.ensure_schema().await?;
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_title_and_director(
        &self,
        title: &str,
        director: &str,
    ) -> Result<Vec<Movie>, StoreError> {
        self.ensure_schema().await?;
        Ok(MovieRepo::find_by_title_and_director(&self.pool, title, director).await?)
    }

    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        self.ensure_schema().await?;
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn top_rated(&self, limit: usize) -> Result<Vec<Movie>, StoreError> {
        self.ensure_schema().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(MovieRepo::top_rated(&self.pool, limit).await?)
    }

    async fn replace(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        self.ensure_schema().await?;
        Ok(MovieRepo::replace(&self.pool, movie).await?)
    }

    async fn delete(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        self.ensure_schema().await?;
        Ok(MovieRepo::delete(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.ensure_schema().await?;
        let count = MovieRepo::count(&self.pool).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_schema().await?;
        Ok(crate::health_check(&self.pool).await?)
    }
}
