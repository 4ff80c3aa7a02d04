//! Request handlers.
//!
//! Each handler validates its query parameters, calls one engine operation
//! and serializes the records it gets back. No other logic lives here.

use axum::{
    Json,
    extract::{Query, State},
};
use catalog::MovieRecord;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Result count used when `num` is absent or not an integer
pub const DEFAULT_NUM: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    title: Option<String>,
    num: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesQuery {
    #[serde(default)]
    genres: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    keywords: String,
    num: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

fn parse_num(num: Option<&str>) -> i64 {
    num.and_then(|n| n.trim().parse().ok()).unwrap_or(DEFAULT_NUM)
}

fn to_owned_records(records: Vec<&MovieRecord>) -> Vec<MovieRecord> {
    records.into_iter().cloned().collect()
}

pub async fn home() -> Json<Value> {
    Json(json!({ "message": "Movie Recommendation API" }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": state.engine.status().as_str(),
        "movies": state.engine.len(),
    }))
}

pub async fn get_all_movies(State(state): State<AppState>) -> Json<Vec<MovieRecord>> {
    Json(state.engine.get_all_movies().to_vec())
}

pub async fn recommendations_by_movie(
    State(state): State<AppState>,
    Query(params): Query<MovieQuery>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let title = params
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title parameter is required".to_string()))?;
    let num = parse_num(params.num.as_deref());

    let recs = state.engine.get_recommendations(&title, num);
    Ok(Json(to_owned_records(recs)))
}

pub async fn recommendations_by_preferences(
    State(state): State<AppState>,
    Query(params): Query<PreferencesQuery>,
) -> Json<Vec<MovieRecord>> {
    let num = parse_num(params.num.as_deref());
    let recs = state.engine.get_recommendations_by_preferences(
        &params.genres,
        &params.director,
        &params.keywords,
        num,
    );
    Json(to_owned_records(recs))
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter is required".to_string()))?;

    Ok(Json(to_owned_records(state.engine.search_movies(&query))))
}
