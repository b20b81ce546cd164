use std::sync::Arc;

use axum::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use routeplan_orchestrator::Orchestrator;

use super::parse_date;
use crate::routes::api::AppError;

/// Runs the enrichment fetch for one date, or answers from the cache when
/// the date has already been enriched in this session. Errors are not
/// retried here; the caller re-triggers explicitly.
pub async fn enrich(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let responses = orchestrator.enrich(date).await?;

    Ok(Json(responses))
}

pub async fn clear_enrichment(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    orchestrator.enrichment_cache.clear_enriched_appointments(date);
    orchestrator.persist()?;

    Ok(StatusCode::NO_CONTENT)
}
