pub mod company_handlers;
pub mod enrichment_handlers;
pub mod scenario_handlers;

use routeplan_orchestrator::DateKey;

use crate::routes::api::AppError;

/// Path segments carry dates as `YYYY-MM-DD`; anything else is the
/// caller's mistake, not a missing resource.
pub(crate) fn parse_date(raw: &str) -> Result<DateKey, AppError> {
    raw.parse::<DateKey>()
        .map_err(|_| AppError::BadRequest(format!("'{raw}' is not a date of the form YYYY-MM-DD")))
}
