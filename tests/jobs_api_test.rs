use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobhunt_backend::{middleware::rate_limit, routes, store::MemoryStore, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new(Duration::ZERO)));
    routes::jobs::routes()
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RpsLimit::new(100),
            rate_limit::limit_rps,
        ))
        .with_state(state)
}

async fn create_job(app: &Router, title: &str, industry: &str, min: i64, max: i64) {
    let body = json!({
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "industry": industry,
        "salary_min": min,
        "salary_max": max,
        "description": format!("{} role", title),
        "requirements": ["Rust"]
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

async fn list_jobs(app: &Router, query: &str) -> Vec<JsonValue> {
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/jobs{}", query))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    body["items"].as_array().cloned().unwrap()
}

#[tokio::test]
async fn listing_filters_combine_across_dimensions() {
    let app = app();
    create_job(&app, "Senior Engineer", "Technology", 120000, 160000).await;
    create_job(&app, "Financial Analyst", "Finance", 85000, 110000).await;
    create_job(&app, "Platform Engineer", "Technology", 60000, 70000).await;

    let items = list_jobs(&app, "?industries=Technology").await;
    assert_eq!(items.len(), 2);

    let items = list_jobs(&app, "?industries=Technology&salary_min=70000&salary_max=90000").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Platform Engineer");

    let items = list_jobs(&app, "?job_title=ENGINEER").await;
    assert_eq!(items.len(), 2);

    let items = list_jobs(&app, "").await;
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn search_term_spans_title_company_and_description() {
    let app = app();
    create_job(&app, "Backend Dev", "Technology", 0, 0).await;
    create_job(&app, "Analyst", "Finance", 0, 0).await;

    let items = list_jobs(&app, "?search=analyst%20role").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Analyst");
}

#[tokio::test]
async fn get_and_patch_round_trip() {
    let app = app();
    create_job(&app, "Backend Dev", "Technology", 100000, 120000).await;

    let req = Request::builder()
        .method("PATCH")
        .uri("/api/jobs/1")
        .header("content-type", "application/json")
        .body(Body::from(json!({"title": "Staff Backend Dev"}).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .method("GET")
        .uri("/api/jobs/1")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["title"], "Staff Backend Dev");
    assert_eq!(body["company"], "Acme");
}

#[tokio::test]
async fn missing_job_is_a_404_with_error_body() {
    let app = app();
    let req = Request::builder()
        .method("GET")
        .uri("/api/jobs/99")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_rejects_blank_title() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"title": "", "company": "Acme", "location": "Remote"}).to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
