use std::sync::Arc;

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use routeplan_orchestrator::Orchestrator;

use crate::handlers::company_handlers::get_company_info;
use crate::handlers::company_handlers::reset_company_info;
use crate::handlers::company_handlers::upload_company_info;
use crate::handlers::enrichment_handlers::clear_enrichment;
use crate::handlers::enrichment_handlers::enrich;
use crate::handlers::scenario_handlers::build_request;
use crate::handlers::scenario_handlers::clear_exclusions;
use crate::handlers::scenario_handlers::get_scenarios;
use crate::handlers::scenario_handlers::toggle_exclusion;
use crate::handlers::scenario_handlers::upload_scenarios;

pub fn api_scope(state: Arc<Orchestrator>) -> Router<Arc<Orchestrator>> {
    Router::new()
        .route("/scenarios", post(upload_scenarios).get(get_scenarios))
        .route("/scenarios/{date}/request", get(build_request))
        .route("/scenarios/{date}/enrich", post(enrich).delete(clear_enrichment))
        .route("/scenarios/{date}/exclusions/{idx}", post(toggle_exclusion))
        .route("/scenarios/{date}/exclusions", delete(clear_exclusions))
        .route(
            "/company-info/{date}",
            post(upload_company_info)
                .get(get_company_info)
                .delete(reset_company_info),
        )
        .with_state(state)
}
