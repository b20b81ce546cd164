pub mod v1;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use routeplan_orchestrator::enrichment::EnrichmentError;
use routeplan_orchestrator::request_builder::RequestBuilderError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<RequestBuilderError> for AppError {
    fn from(error: RequestBuilderError) -> Self {
        match error {
            RequestBuilderError::ScenarioNotFound(_) => AppError::NotFound(error.to_string()),
        }
    }
}

impl From<EnrichmentError> for AppError {
    fn from(error: EnrichmentError) -> Self {
        match error {
            EnrichmentError::ScenarioNotFound(_) => AppError::NotFound(error.to_string()),
            EnrichmentError::AlreadyFetching(_) => AppError::Conflict(error.to_string()),
            EnrichmentError::Solver { .. } | EnrichmentError::Transport(_) => {
                AppError::Upstream(error.to_string())
            }
        }
    }
}
