use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use data_loader::{GenreStats, MonthCount, PlatformYearCounts, YearCount};

use crate::error::{RecommendError, RecommendResult};
use crate::recommender::GameRecommendation;

use super::AppState;

/// Default number of recommendations when `n` is omitted.
pub const DEFAULT_RECOMMENDATIONS: i64 = 5;

// Request/Response types

/// Raw query string of `/recommend`.
///
/// Both fields are taken as strings so malformed values produce our own
/// JSON error instead of the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub game_title: Option<String>,
    pub n: Option<String>,
}

impl RecommendParams {
    /// Validate into `(title, limit)`.
    ///
    /// Non-positive counts become a limit of 0 (an empty result).
    pub fn validate(self) -> RecommendResult<(String, usize)> {
        let title = self
            .game_title
            .ok_or_else(|| RecommendError::InvalidArgument("game_title is required".to_string()))?;

        let n = match self.n.as_deref() {
            None => DEFAULT_RECOMMENDATIONS,
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                RecommendError::InvalidArgument(format!("n must be an integer, got {:?}", raw))
            })?,
        };

        let limit = usize::try_from(n.max(0)).unwrap_or(usize::MAX);
        Ok((title, limit))
    }
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

// Handlers

pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Game Review API".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Number of reviews per release year
pub async fn reviews_by_year(State(state): State<AppState>) -> Json<Vec<YearCount>> {
    Json(state.dataset.reviews_by_year())
}

/// Number of reviews per release month (recent years only)
pub async fn reviews_by_month(State(state): State<AppState>) -> Json<Vec<MonthCount>> {
    Json(state.dataset.reviews_by_month())
}

/// Most reviewed genres with their average score
pub async fn genre_popularity(State(state): State<AppState>) -> Json<Vec<GenreStats>> {
    Json(state.dataset.genre_popularity())
}

/// Reviews per platform family and year
pub async fn platform_distribution(
    State(state): State<AppState>,
) -> Json<Vec<PlatformYearCounts>> {
    Json(state.dataset.platform_distribution())
}

/// Games similar to `game_title`
///
/// Encoding and the similarity matrix are CPU-bound, so the work runs on
/// the blocking pool rather than on the async executor.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> RecommendResult<Json<Vec<GameRecommendation>>> {
    let (title, limit) = params.validate()?;
    debug!("Recommendation request for {:?} (n = {})", title, limit);

    let recommender = state.recommender.clone();
    let recommendations = tokio::task::spawn_blocking(move || recommender.recommend(&title, limit))
        .await
        .map_err(|e| RecommendError::Internal(format!("Recommendation task failed: {}", e)))??;

    Ok(Json(recommendations))
}
