//! Errors surfaced by the recommendation service and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pipeline::PipelineError;
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    /// No record carries the requested title
    #[error("Game title not found: {0}")]
    NotFound(String),

    /// A request parameter could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Similarity pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        let status = match self {
            RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
            RecommendError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RecommendError::Pipeline(_) | RecommendError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type RecommendResult<T> = Result<T, RecommendError>;
