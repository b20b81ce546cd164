use routeplan_contracts::optimization::AppointmentPayload;
use routeplan_contracts::optimization::OptimizationRequest;
use routeplan_planning_environment::DateKey;
use routeplan_planning_environment::company::CompanyInfo;
use thiserror::Error;

use crate::stores::CompanyInfoStore;
use crate::stores::ExclusionStore;
use crate::stores::ScenarioStore;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestBuilderError {
    #[error("no scenario found for date {0}")]
    ScenarioNotFound(DateKey),
}

/// Assembles the solver payload for one day from the three read-side
/// stores. Pure read-and-assemble: no store is mutated and nothing is sent.
///
/// Jobs whose index is in the day's exclusion set are dropped; the
/// remaining jobs keep their original order. Missing company info falls
/// back to the blank default rather than failing the build.
pub fn build(
    scenarios: &ScenarioStore,
    company_info: &CompanyInfoStore,
    exclusions: &ExclusionStore,
    date: DateKey,
) -> Result<OptimizationRequest, RequestBuilderError> {
    let scenario = scenarios
        .scenario_for(date)
        .ok_or(RequestBuilderError::ScenarioNotFound(date))?;

    let excluded = exclusions.excluded_for(date);

    let appointments = scenario
        .jobs
        .iter()
        .enumerate()
        .filter(|(idx, _)| !excluded.contains(idx))
        .map(|(_, job)| AppointmentPayload::from(job))
        .collect();

    Ok(OptimizationRequest {
        company_info: company_info
            .company_info_for(date)
            .unwrap_or_else(CompanyInfo::blank),
        appointments,
    })
}
