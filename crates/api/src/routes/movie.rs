//! Route definitions for the movie catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Movie routes, mounted under the API prefix.
///
/// ```text
/// POST   /movie          -> create
/// GET    /movie/{id}     -> get_by_id
/// PUT    /movie/{id}     -> update
/// DELETE /movie/{id}     -> delete
/// GET    /movies         -> list
/// POST   /movies/top     -> top_rated
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movie", post(movie::create))
        .route(
            "/movie/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
        .route("/movies", get(movie::list))
        .route("/movies/top", post(movie::top_rated))
}
