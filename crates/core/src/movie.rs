//! Movie entity, creation input, and partial-update patch.
//!
//! [`Movie`] is the persisted shape. [`NewMovie`] is an accepted creation
//! payload (the store assigns id and timestamps). [`MoviePatch`] carries the
//! fields of an update with explicit presence: `None` keeps the stored value,
//! `Some` overwrites it, including falsy values such as a rating of `0`.
//!
//! Loose HTTP input is turned into these types by [`crate::validation`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{MovieId, Timestamp};

/// Lowest accepted rating (inclusive).
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating (inclusive).
pub const MAX_RATING: f64 = 10.0;

/// A movie record as stored and returned to clients.
///
/// Serialized with `_id`, `createdAt` and `updatedAt` keys, which is the
/// shape the browser client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", alias = "id")]
    pub id: MovieId,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "synopsis must not be empty"))]
    pub synopsis: String,
    #[validate(length(min = 1, message = "director must not be empty"))]
    pub director: String,
    pub writers: Vec<String>,
    pub stars: Vec<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: f64,
    pub showtimes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A validated creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub synopsis: String,
    pub director: String,
    pub writers: Vec<String>,
    pub stars: Vec<String>,
    pub rating: f64,
    pub showtimes: Vec<String>,
}

impl NewMovie {
    /// The `(title, director)` pair rendered for duplicate-record messages.
    pub fn identity(&self) -> String {
        format!("\"{}\" directed by {}", self.title, self.director)
    }
}

/// Fields supplied to an update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MoviePatch {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "synopsis must not be empty"))]
    pub synopsis: Option<String>,
    #[validate(length(min = 1, message = "director must not be empty"))]
    pub director: Option<String>,
    pub writers: Option<Vec<String>>,
    pub stars: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    pub showtimes: Option<Vec<String>>,
}

impl MoviePatch {
    /// True when the patch would leave every field untouched.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the patch into `movie`, field by field.
    ///
    /// Timestamps and id are left alone; the store refreshes `updated_at`
    /// when the merged record is written back.
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(synopsis) = self.synopsis {
            movie.synopsis = synopsis;
        }
        if let Some(director) = self.director {
            movie.director = director;
        }
        if let Some(writers) = self.writers {
            movie.writers = writers;
        }
        if let Some(stars) = self.stars {
            movie.stars = stars;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(showtimes) = self.showtimes {
            movie.showtimes = showtimes;
        }
    }
}
