use axum::{Router, routing::get};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::AppState;
use super::handlers;

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Charting aggregates
        .route("/reviews-by-year", get(handlers::reviews_by_year))
        .route("/reviews-by-month", get(handlers::reviews_by_month))
        .route("/genre-popularity", get(handlers::genre_popularity))
        .route("/platform-distribution", get(handlers::platform_distribution))
        // Recommendations
        .route("/recommend", get(handlers::recommend))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
