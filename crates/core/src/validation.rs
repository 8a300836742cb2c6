//! Movie entity validator.
//!
//! Turns loosely-typed request bodies into [`NewMovie`] and [`MoviePatch`]
//! values. Checking happens in two passes:
//!
//! 1. Shape: every supplied field must have a usable JSON type. Ratings may
//!    arrive as numbers or numeric strings; list fields as arrays of strings or
//!    as one string delimited by `,` or `|`. Strings are trimmed.
//! 2. Rules: presence, non-emptiness and the rating range, expressed as
//!    `validator` derive rules on the candidate structs.
//!
//! Either pass reports every violated field at once.

use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::movie::{Movie, MoviePatch, NewMovie};

/// Number of movies returned by the top-rated listing when the caller does
/// not supply a usable `limit`.
pub const DEFAULT_TOP_RATED_LIMIT: usize = 3;

/// Separators accepted inside a single-string list field.
const LIST_DELIMITERS: [char; 2] = [',', '|'];

/// Creation candidate: every field must be present.
#[derive(Debug, Validate)]
struct MovieDraft {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    title: Option<String>,
    #[validate(
        required(message = "synopsis is required"),
        length(min = 1, message = "synopsis must not be empty")
    )]
    synopsis: Option<String>,
    #[validate(
        required(message = "director is required"),
        length(min = 1, message = "director must not be empty")
    )]
    director: Option<String>,
    #[validate(
        required(message = "writers is required"),
        length(min = 1, message = "writers must not be empty")
    )]
    writers: Option<Vec<String>>,
    #[validate(
        required(message = "stars is required"),
        length(min = 1, message = "stars must not be empty")
    )]
    stars: Option<Vec<String>>,
    #[validate(
        required(message = "rating is required"),
        range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10")
    )]
    rating: Option<f64>,
    #[validate(
        required(message = "showtimes is required"),
        length(min = 1, message = "showtimes must not be empty")
    )]
    showtimes: Option<Vec<String>>,
}

impl From<MoviePatch> for MovieDraft {
    fn from(fields: MoviePatch) -> Self {
        Self {
            title: fields.title,
            synopsis: fields.synopsis,
            director: fields.director,
            writers: fields.writers,
            stars: fields.stars,
            rating: fields.rating,
            showtimes: fields.showtimes,
        }
    }
}

impl MovieDraft {
    fn into_new_movie(self) -> Result<NewMovie, CoreError> {
        let MovieDraft {
            title: Some(title),
            synopsis: Some(synopsis),
            director: Some(director),
            writers: Some(writers),
            stars: Some(stars),
            rating: Some(rating),
            showtimes: Some(showtimes),
        } = self
        else {
            return Err(CoreError::Internal(
                "validated movie draft is missing fields".to_string(),
            ));
        };

        Ok(NewMovie {
            title,
            synopsis,
            director,
            writers,
            stars,
            rating,
            showtimes,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Validate a creation body. All seven movie fields are required.
pub fn validate_new_movie(body: &Value) -> Result<NewMovie, CoreError> {
    let draft = MovieDraft::from(parse_fields(body)?);
    draft.validate().map_err(CoreError::Validation)?;
    draft.into_new_movie()
}

/// Validate an update body. Missing or `null` fields mean "keep the stored
/// value"; supplied fields obey the creation rules, except that list fields
/// may be empty.
pub fn validate_movie_patch(body: &Value) -> Result<MoviePatch, CoreError> {
    let patch = parse_fields(body)?;
    patch.validate().map_err(CoreError::Validation)?;
    Ok(patch)
}

/// Re-check a merged record before it is written back.
pub fn validate_movie(movie: &Movie) -> Result<(), CoreError> {
    movie.validate().map_err(CoreError::Validation)
}

/// Split a delimited list such as `"Leonardo DiCaprio, Kate Winslet"`.
///
/// Both `,` and `|` separate items; blanks are dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITERS)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Read the `limit` of a top-rated request.
///
/// Accepts a positive integer or a string holding one. Anything else,
/// including a missing body, yields [`DEFAULT_TOP_RATED_LIMIT`]. There is no
/// upper bound.
pub fn top_rated_limit(body: &Value) -> usize {
    let requested = match body.get("limit") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    requested
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_TOP_RATED_LIMIT)
}

// ---------------------------------------------------------------------------
// Shape pass
// ---------------------------------------------------------------------------

fn parse_fields(body: &Value) -> Result<MoviePatch, CoreError> {
    let mut errors = ValidationErrors::new();

    let Some(obj) = body.as_object() else {
        errors.add("body", shape_error("body", "must be a JSON object"));
        return Err(CoreError::Validation(errors));
    };

    let fields = MoviePatch {
        title: read_text(obj, "title", &mut errors),
        synopsis: read_text(obj, "synopsis", &mut errors),
        director: read_text(obj, "director", &mut errors),
        writers: read_list(obj, "writers", &mut errors),
        stars: read_list(obj, "stars", &mut errors),
        rating: read_rating(obj, "rating", &mut errors),
        showtimes: read_list(obj, "showtimes", &mut errors),
    };

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(CoreError::Validation(errors))
    }
}

fn shape_error(field: &str, problem: &str) -> ValidationError {
    ValidationError::new("type").with_message(format!("{field} {problem}").into())
}

fn read_text(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.add(field, shape_error(field, "must be a string"));
            None
        }
    }
}

fn read_list(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(split_list(s)),
        Some(Value::Array(items)) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => list.push(s.trim().to_string()),
                    Value::String(_) => {}
                    _ => {
                        errors.add(field, shape_error(field, "must be a list of strings"));
                        return None;
                    }
                }
            }
            Some(list)
        }
        Some(_) => {
            errors.add(field, shape_error(field, "must be a list of strings"));
            None
        }
    }
}

fn read_rating(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let parsed = match obj.get(field) {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(rating) if rating.is_finite() => Some(rating),
        _ => {
            errors.add(field, shape_error(field, "must be a number"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
