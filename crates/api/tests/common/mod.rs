#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cinema_api::config::{ServerConfig, StoreBackend};
use cinema_api::router::build_app_router;
use cinema_api::service::MovieService;
use cinema_api::state::AppState;
use cinema_db::{MemoryMovieStore, MovieStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: String::new(),
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn MovieStore>) -> Router {
    let state = AppState {
        movies: MovieService::new(store),
    };
    build_app_router(state, &test_config())
}

/// A fresh in-memory store, returned alongside so tests can inspect it.
pub fn memory_store() -> Arc<MemoryMovieStore> {
    Arc::new(MemoryMovieStore::new())
}

pub fn titanic() -> Value {
    serde_json::json!({
        "title": "Titanic",
        "synopsis": "A seventeen-year-old aristocrat falls in love aboard the ill-fated ship.",
        "director": "James Cameron",
        "writers": ["James Cameron"],
        "stars": ["Leonardo DiCaprio", "Kate Winslet"],
        "rating": 7.7,
        "showtimes": ["12:30", "19:30"]
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Send a raw, possibly malformed body.
pub async fn send_raw(app: Router, method: Method, uri: &str, raw: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
