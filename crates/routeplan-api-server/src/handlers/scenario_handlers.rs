use std::sync::Arc;

use axum::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use routeplan_data_processing::parse_appointments;
use routeplan_orchestrator::Orchestrator;
use serde::Serialize;
use tracing::info;

use super::parse_date;
use crate::routes::api::AppError;

#[derive(Serialize)]
pub struct UploadResponse {
    pub scenarios: Vec<ScenarioSummary>,
    pub rejected: Vec<RejectedRowReport>,
}

#[derive(Serialize)]
pub struct ScenarioSummary {
    pub date: String,
    pub jobs: usize,
}

#[derive(Serialize)]
pub struct RejectedRowReport {
    pub line: u64,
    pub raw: String,
    pub reason: String,
}

/// Ingests an appointment CSV body: parse, bucket by day, and replace the
/// whole scenario list. Exclusions and cached enrichment are cascaded
/// away by the replacement; rejected rows come back in the response so
/// the uploader can fix the source data.
pub async fn upload_scenarios(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let parse = parse_appointments(&body)
        .map_err(|error| AppError::BadRequest(format!("the appointment csv is unreadable: {error:#}")))?;

    info!(
        scenarios = parse.scenarios.len(),
        rejected = parse.rejected.len(),
        "appointment upload parsed"
    );

    let response = UploadResponse {
        scenarios: parse
            .scenarios
            .iter()
            .map(|scenario| ScenarioSummary {
                date: scenario.date.to_string(),
                jobs: scenario.jobs.len(),
            })
            .collect(),
        rejected: parse
            .rejected
            .iter()
            .map(|rejected| RejectedRowReport {
                line: rejected.line,
                raw: rejected.raw.clone(),
                reason: rejected.reason.to_string(),
            })
            .collect(),
    };

    orchestrator.replace_scenarios(parse.scenarios)?;

    Ok(Json(response))
}

pub async fn get_scenarios(
    State(orchestrator): State<Arc<Orchestrator>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(orchestrator.scenarios.all().as_ref().clone()))
}

pub async fn build_request(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let request = orchestrator.build_request(date)?;

    Ok(Json(request))
}

pub async fn toggle_exclusion(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path((date, idx)): Path<(String, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    orchestrator.toggle_excluded_appointment(date, idx)?;

    Ok(Json(orchestrator.exclusions.excluded_for(date)))
}

pub async fn clear_exclusions(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    orchestrator.clear_excluded_appointments(date)?;

    Ok(StatusCode::NO_CONTENT)
}
