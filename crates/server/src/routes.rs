use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/movies", get(handlers::get_all_movies))
        .route(
            "/api/recommendations/movie",
            get(handlers::recommendations_by_movie),
        )
        .route(
            "/api/recommendations/preferences",
            get(handlers::recommendations_by_preferences),
        )
        .route("/api/search", get(handlers::search_movies))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
