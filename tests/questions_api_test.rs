use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobhunt_backend::{routes, store::MemoryStore, AppState};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::with_seed(Duration::ZERO)));
    routes::questions::routes().with_state(state)
}

async fn get_list(app: &Router, uri: &str) -> Vec<JsonValue> {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    body.as_array().cloned().unwrap()
}

#[tokio::test]
async fn browse_filters_combine_with_and_semantics() {
    let app = app();

    let all = get_list(&app, "/api/questions").await;
    assert_eq!(all.len(), 4);

    let filtered = get_list(
        &app,
        "/api/questions?category=software-engineering&difficulty=intermediate",
    )
    .await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered[0]["question"],
        "How would you design a URL shortener?"
    );

    let none = get_list(
        &app,
        "/api/questions?category=software-engineering&difficulty=beginner",
    )
    .await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn the_all_sentinel_leaves_a_dimension_inactive() {
    let app = app();
    let items = get_list(&app, "/api/questions?category=all&difficulty=all").await;
    assert_eq!(items.len(), 4);
}

#[tokio::test]
async fn free_text_search_matches_tags_case_insensitively() {
    let app = app();
    let items = get_list(&app, "/api/questions?search=SYSTEM-DESIGN").await;
    assert_eq!(items.len(), 1);

    let items = get_list(&app, "/api/questions/search?q=bias").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "data-science");
}

#[tokio::test]
async fn category_and_difficulty_paths_filter_exactly() {
    let app = app();
    let items = get_list(&app, "/api/questions/category/data-science").await;
    assert_eq!(items.len(), 1);

    let items = get_list(&app, "/api/questions/difficulty/advanced").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "product-management");
}

#[tokio::test]
async fn unknown_category_is_a_bad_request() {
    let app = app();
    let req = Request::builder()
        .method("GET")
        .uri("/api/questions/category/astrology")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn question_detail_carries_split_key_points_and_tags() {
    let app = app();
    let req = Request::builder()
        .method("GET")
        .uri("/api/questions/1")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["question"], "Tell me about yourself.");
    assert_eq!(body["key_points"].as_array().unwrap().len(), 3);
    assert_eq!(body["tags"], serde_json::json!(["intro", "behavioral"]));
}
