use crate::service::MovieService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Movie operations over the configured record store.
    pub movies: MovieService,
}
