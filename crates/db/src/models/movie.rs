//! Movie row model.

use cinema_core::movie::Movie;
use cinema_core::types::{MovieId, Timestamp};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: MovieId,
    pub title: String,
    pub synopsis: String,
    pub director: String,
    pub writers: Vec<String>,
    pub stars: Vec<String>,
    pub rating: f64,
    pub showtimes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            synopsis: row.synopsis,
            director: row.director,
            writers: row.writers,
            stars: row.stars,
            rating: row.rating,
            showtimes: row.showtimes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
