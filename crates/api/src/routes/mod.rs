pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Prefix the browser client uses for every movie route.
pub const API_PREFIX: &str = "/api/v0.1";

/// Build the route tree nested under [`API_PREFIX`].
///
/// ```text
/// /movie                  create
/// /movie/{id}             get, update, delete
/// /movies                 list
/// /movies/top             top rated
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(movie::router())
}
