//! Repository for the `movies` table.

use cinema_core::movie::{Movie, NewMovie};
use cinema_core::types::MovieId;
use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, synopsis, director, writers, stars, rating, showtimes, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie under `id`, unless a movie with the same title and
    /// director already exists.
    ///
    /// Returns `None` when the pair is taken. Creates of the same pair are
    /// serialized by a transaction-scoped advisory lock keyed on the pair, so
    /// the existence check always sees a concurrent winner's committed row.
    pub async fn create(
        pool: &PgPool,
        id: MovieId,
        input: &NewMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || chr(31) || $2))")
            .bind(&input.title)
            .bind(&input.director)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO movies (id, title, synopsis, director, writers, stars, rating, showtimes)
             SELECT $1, $2, $3, $4, $5, $6, $7, $8
             WHERE NOT EXISTS (
                 SELECT 1 FROM movies WHERE title = $2 AND director = $4
             )
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.director)
            .bind(&input.writers)
            .bind(&input.stars)
            .bind(input.rating)
            .bind(&input.showtimes)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Movie::from))
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: MovieId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    /// Find movies with exactly this title and director.
    pub async fn find_by_title_and_director(
        pool: &PgPool,
        title: &str,
        director: &str,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies WHERE title = $1 AND director = $2
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(title)
            .bind(director)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// List all movies in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// List up to `limit` movies, highest rating first. Equal ratings keep
    /// insertion order.
    pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             ORDER BY rating DESC, created_at, id
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// Overwrite every mutable field of `movie` and refresh `updated_at`.
    ///
    /// Returns `None` if no row with `movie.id` exists.
    pub async fn replace(pool: &PgPool, movie: &Movie) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                synopsis = $3,
                director = $4,
                writers = $5,
                stars = $6,
                rating = $7,
                showtimes = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(movie.id)
            .bind(&movie.title)
            .bind(&movie.synopsis)
            .bind(&movie.director)
            .bind(&movie.writers)
            .bind(&movie.stars)
            .bind(movie.rating)
            .bind(&movie.showtimes)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    /// Permanently delete a movie, returning the removed row.
    pub async fn delete(pool: &PgPool, id: MovieId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("DELETE FROM movies WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    /// Number of stored movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
