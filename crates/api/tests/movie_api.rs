//! HTTP-level integration tests for the movie endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Backed by the in-memory record store.

mod common;

use axum::http::{Method, StatusCode};
use cinema_db::MovieStore;
use common::{body_json, delete, get, post_json, put_json, send, send_raw, titanic};
use serde_json::json;

fn movie_with(title: &str, rating: f64) -> serde_json::Value {
    let mut body = titanic();
    body["title"] = json!(title);
    body["rating"] = json!(rating);
    body
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn titanic_lifecycle() {
    let store = common::memory_store();
    let app = common::build_test_app(store.clone());

    // Create
    let response = post_json(app.clone(), "/api/v0.1/movie", titanic()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Movie created!");
    let id = created["id"].as_str().unwrap().to_string();

    // Read back
    let response = get(app.clone(), &format!("/api/v0.1/movie/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["success"], true);
    let data = &fetched["data"];
    assert_eq!(data["_id"], id.as_str());
    for field in ["title", "synopsis", "director", "writers", "stars", "rating", "showtimes"] {
        assert_eq!(data[field], titanic()[field], "field {field}");
    }
    assert!(data["createdAt"].is_string());
    assert!(data["updatedAt"].is_string());

    // Partial update
    let response = put_json(
        app.clone(),
        &format!("/api/v0.1/movie/{id}"),
        json!({ "rating": 8.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["success"], true);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["message"], "Movie updated!");

    let response = get(app.clone(), &format!("/api/v0.1/movie/{id}")).await;
    let after = body_json(response).await["data"].clone();
    assert_eq!(after["rating"], 8.0);
    for field in ["title", "synopsis", "director", "writers", "stars", "showtimes", "createdAt"] {
        assert_eq!(after[field], data[field], "field {field}");
    }

    // Delete
    let response = delete(app.clone(), &format!("/api/v0.1/movie/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["message"], "Movie deleted!");
    assert_eq!(deleted["data"]["_id"], id.as_str());
    assert_eq!(deleted["data"]["rating"], 8.0);

    // Gone
    let response = get(app, &format!("/api/v0.1/movie/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.count().await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_body_returns_400() {
    let store = common::memory_store();
    let app = common::build_test_app(store.clone());

    let response = send(app, Method::POST, "/api/v0.1/movie", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "MISSING_BODY");
    assert_eq!(json["error"], "You must provide a body to create!");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let app = common::build_test_app(common::memory_store());
    let response = send_raw(app, Method::POST, "/api/v0.1/movie", "{\"title\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_with_out_of_range_rating_returns_400() {
    let store = common::memory_store();
    let app = common::build_test_app(store.clone());

    let mut body = titanic();
    body["rating"] = json!(11);
    let response = post_json(app, "/api/v0.1/movie", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]["rating"].is_array());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_with_missing_fields_names_each_field() {
    let app = common::build_test_app(common::memory_store());
    let response = post_json(app, "/api/v0.1/movie", json!({ "title": "Alien" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    for field in ["synopsis", "director", "writers", "stars", "rating", "showtimes"] {
        assert!(json["error"][field].is_array(), "missing {field}");
    }
    assert!(json["error"].get("title").is_none());
}

#[tokio::test]
async fn create_duplicate_title_and_director_returns_400() {
    let store = common::memory_store();
    let app = common::build_test_app(store.clone());

    let first = post_json(app.clone(), "/api/v0.1/movie", titanic()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut again = titanic();
    again["rating"] = json!(9.9);
    let second = post_json(app, "/api/v0.1/movie", again).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let json = body_json(second).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "DUPLICATE_RECORD");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn create_accepts_delimited_lists_and_string_rating() {
    let app = common::build_test_app(common::memory_store());

    let mut body = titanic();
    body["stars"] = json!("Leonardo DiCaprio, Kate Winslet|Billy Zane");
    body["showtimes"] = json!("12:30, 19:30");
    body["rating"] = json!("7.7");
    let response = post_json(app.clone(), "/api/v0.1/movie", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let data = body_json(get(app, &format!("/api/v0.1/movie/{id}")).await).await["data"].clone();
    assert_eq!(
        data["stars"],
        json!(["Leonardo DiCaprio", "Kate Winslet", "Billy Zane"])
    );
    assert_eq!(data["showtimes"], json!(["12:30", "19:30"]));
    assert_eq!(data["rating"], 7.7);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let app = common::build_test_app(common::memory_store());

    for uri in [
        "/api/v0.1/movie/0190f3c2-7b1e-7c3a-9d2e-123456789abc",
        "/api/v0.1/movie/not-a-valid-id",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn undecodable_id_returns_error_envelope() {
    let app = common::build_test_app(common::memory_store());

    for method in [Method::GET, Method::DELETE] {
        let response = send(app.clone(), method.clone(), "/api/v0.1/movie/%FF", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn list_empty_catalog_returns_404() {
    let app = common::build_test_app(common::memory_store());
    let response = get(app, "/api/v0.1/movies").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn list_returns_movies_in_insertion_order() {
    let app = common::build_test_app(common::memory_store());
    for title in ["First", "Second", "Third"] {
        post_json(app.clone(), "/api/v0.1/movie", movie_with(title, 5.0)).await;
    }

    let response = get(app, "/api/v0.1/movies").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let app = common::build_test_app(common::memory_store());
    let response = put_json(
        app,
        "/api/v0.1/movie/0190f3c2-7b1e-7c3a-9d2e-123456789abc",
        json!({ "rating": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_body_returns_400() {
    let app = common::build_test_app(common::memory_store());
    let created = body_json(post_json(app.clone(), "/api/v0.1/movie", titanic()).await).await;
    let id = created["id"].as_str().unwrap();

    let response = send(app, Method::PUT, &format!("/api/v0.1/movie/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_BODY");
    assert_eq!(json["error"], "You must provide a body to update!");
}

#[tokio::test]
async fn update_to_zero_rating_is_stored() {
    let app = common::build_test_app(common::memory_store());
    let created = body_json(post_json(app.clone(), "/api/v0.1/movie", titanic()).await).await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/v0.1/movie/{id}"),
        json!({ "rating": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(get(app, &format!("/api/v0.1/movie/{id}")).await).await["data"].clone();
    assert_eq!(data["rating"], 0.0);
    assert_eq!(data["title"], "Titanic");
}

#[tokio::test]
async fn update_with_invalid_rating_returns_400_and_keeps_record() {
    let app = common::build_test_app(common::memory_store());
    let created = body_json(post_json(app.clone(), "/api/v0.1/movie", titanic()).await).await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/v0.1/movie/{id}"),
        json!({ "rating": 12 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let data = body_json(get(app, &format!("/api/v0.1/movie/{id}")).await).await["data"].clone();
    assert_eq!(data["rating"], 7.7);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let app = common::build_test_app(common::memory_store());
    let response = delete(app, "/api/v0.1/movie/0190f3c2-7b1e-7c3a-9d2e-123456789abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Top rated
// ---------------------------------------------------------------------------

#[tokio::test]
async fn top_rated_returns_highest_first() {
    let app = common::build_test_app(common::memory_store());
    for (title, rating) in [("Five", 5.0), ("Nine", 9.0), ("Seven", 7.0)] {
        post_json(app.clone(), "/api/v0.1/movie", movie_with(title, rating)).await;
    }

    let response = post_json(app, "/api/v0.1/movies/top", json!({ "limit": 2 })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let ratings: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["rating"].as_f64().unwrap())
        .collect();
    assert_eq!(ratings, vec![9.0, 7.0]);
}

#[tokio::test]
async fn top_rated_on_empty_catalog_is_empty_success() {
    let app = common::build_test_app(common::memory_store());
    let response = send(app, Method::POST, "/api/v0.1/movies/top", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unmatched_route_returns_not_found_message() {
    let app = common::build_test_app(common::memory_store());
    let response = get(app, "/api/v0.1/films").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Not found!");
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn unsupported_method_on_known_path_returns_not_found() {
    let app = common::build_test_app(common::memory_store());
    let created = body_json(post_json(app.clone(), "/api/v0.1/movie", titanic()).await).await;
    let id = created["id"].as_str().unwrap();

    for (method, uri) in [
        (Method::PATCH, format!("/api/v0.1/movie/{id}")),
        (Method::GET, "/api/v0.1/movie".to_string()),
        (Method::DELETE, "/api/v0.1/movies".to_string()),
    ] {
        let response = send(app.clone(), method.clone(), &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Not found!");
    }
}
