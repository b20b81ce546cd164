use std::sync::Arc;

use axum::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use routeplan_data_processing::parse_company_info;
use routeplan_orchestrator::Orchestrator;

use super::parse_date;
use crate::routes::api::AppError;

/// Ingests a free-form company CSV body for one date. The parsed result
/// replaces whatever was stored under that date key in full.
pub async fn upload_company_info(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let company_info = parse_company_info(&body)
        .map_err(|error| AppError::BadRequest(format!("the company csv is unreadable: {error:#}")))?;

    orchestrator.set_company_info(date, company_info.clone())?;

    Ok(Json(company_info))
}

pub async fn get_company_info(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;

    let company_info = orchestrator
        .company_info
        .company_info_for(date)
        .ok_or_else(|| AppError::NotFound(format!("no company info stored for date {date}")))?;

    Ok(Json(company_info))
}

pub async fn reset_company_info(
    State(orchestrator): State<Arc<Orchestrator>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    orchestrator.reset_company_info(date)?;

    Ok(StatusCode::NO_CONTENT)
}
