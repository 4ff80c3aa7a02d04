use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use catalog::{Catalog, DIRECTOR, GENRES, KEYWORDS, MovieRecord, RATING, TITLE};
use engine::SimilarityEngine;
use serde_json::Value;
use server::{AppState, create_router};
use tower::ServiceExt;

fn movie(title: &str, genres: &str, director: &str, keywords: &str, rating: f64) -> MovieRecord {
    MovieRecord::new()
        .with(TITLE, title)
        .with(GENRES, genres)
        .with(DIRECTOR, director)
        .with(KEYWORDS, keywords)
        .with(RATING, rating)
        .with("year", 2000i64)
}

fn create_test_app() -> Router {
    let engine = SimilarityEngine::build(Catalog::from_records(vec![
        movie("A", "Action,Comedy", "X", "k1,k2", 8.0),
        movie("B", "Action", "Y", "k1", 9.0),
        movie("C", "Drama", "X", "k3", 5.0),
    ]));
    create_router(AppState::new(Arc::new(engine)))
}

fn create_empty_app() -> Router {
    create_router(AppState::new(Arc::new(SimilarityEngine::build(Catalog::default()))))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_home() {
    let (status, body) = get(create_test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Movie Recommendation API");
}

#[tokio::test]
async fn test_health_reports_engine_state() {
    let (_, body) = get(create_test_app(), "/health").await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["movies"], 3);

    let (_, body) = get(create_empty_app(), "/health").await;
    assert_eq!(body["status"], "empty");
    assert_eq!(body["movies"], 0);
}

#[tokio::test]
async fn test_all_movies_pass_every_field_through() {
    let (status, body) = get(create_test_app(), "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["A", "B", "C"]);
    assert_eq!(body[0]["year"], 2000);
    assert_eq!(body[0]["rating"], 8.0);
    assert_eq!(body[0]["soup"], "action comedy x k1 k2");
}

#[tokio::test]
async fn test_recommend_by_movie() {
    let (status, body) = get(create_test_app(), "/api/recommendations/movie?title=A&num=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["B", "C"]);
}

#[tokio::test]
async fn test_recommend_by_movie_defaults() {
    // Unparseable num falls back to 5, which is more than N - 1
    let (status, body) = get(create_test_app(), "/api/recommendations/movie?title=A&num=lots").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body).len(), 2);

    let (status, body) = get(create_test_app(), "/api/recommendations/movie?title=Nope").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_by_movie_requires_title() {
    for uri in ["/api/recommendations/movie", "/api/recommendations/movie?title="] {
        let (status, body) = get(create_test_app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title parameter is required");
    }
}

#[tokio::test]
async fn test_recommend_by_preferences() {
    let (status, body) = get(create_test_app(), "/api/recommendations/preferences?genres=action").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["B", "A"]);

    let (_, body) = get(create_test_app(), "/api/recommendations/preferences?director=x&num=1").await;
    assert_eq!(titles(&body), vec!["A"]);

    let (_, body) = get(create_test_app(), "/api/recommendations/preferences").await;
    assert_eq!(titles(&body), vec!["B", "A", "C"]);
}

#[tokio::test]
async fn test_search() {
    let (status, body) = get(create_test_app(), "/api/search?q=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["B"]);
}

#[tokio::test]
async fn test_search_requires_query() {
    let (status, body) = get(create_test_app(), "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter is required");
}

#[tokio::test]
async fn test_empty_engine_returns_empty_lists() {
    for uri in [
        "/api/movies",
        "/api/recommendations/movie?title=A",
        "/api/recommendations/preferences?genres=action",
        "/api/search?q=a",
    ] {
        let (status, body) = get(create_empty_app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_cors_headers() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .uri("/api/movies")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
