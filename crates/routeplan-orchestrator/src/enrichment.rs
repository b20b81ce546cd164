use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use reqwest::Client;
use routeplan_configuration::SystemConfigurations;
use routeplan_contracts::enrichment::EnhancedAddressResponse;
use routeplan_contracts::enrichment::EnrichmentResponse;
use routeplan_contracts::optimization::AppointmentPayload;
use routeplan_planning_environment::DateKey;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::info;
use tracing::instrument;

use crate::stores::EnrichmentCache;
use crate::stores::ScenarioStore;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("no scenario found for date {0}")]
    ScenarioNotFound(DateKey),
    #[error("an enrichment fetch for date {0} is already in flight")]
    AlreadyFetching(DateKey),
    #[error("solver returned status {status} for date {date}")]
    Solver { date: DateKey, status: u16 },
    #[error("enrichment request could not be completed")]
    Transport(#[from] reqwest::Error),
}

/// Drives the per-date enrichment lifecycle: Idle -> Fetching -> Cached on
/// success, Idle -> Fetching -> Errored on failure. Errored is terminal
/// until the caller re-triggers the fetch; Cached is terminal until the
/// cache entry is cleared.
///
/// Fetches are single-flight per date key, and a semaphore caps how many
/// distinct dates can be in flight at once so that rapid date switching
/// cannot launch an unbounded number of parallel requests.
pub struct EnrichmentService {
    client: Client,
    configurations: Arc<ArcSwap<SystemConfigurations>>,
    permits: Semaphore,
    in_flight: Arc<Mutex<HashSet<DateKey>>>,
}

impl EnrichmentService {
    pub fn new(configurations: Arc<ArcSwap<SystemConfigurations>>) -> Result<Self> {
        let loaded = configurations.load();

        let client = Client::builder()
            .timeout(Duration::from_secs(loaded.solver.request_timeout_seconds))
            .build()?;
        let permits = Semaphore::new(loaded.enrichment.max_concurrent_fetches);

        drop(loaded);
        Ok(EnrichmentService {
            client,
            configurations,
            permits,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Fetches geocoding enrichment for one date, or returns the cached
    /// entry without touching the network. The fetch is entered only when a
    /// scenario exists for the date; the full job array is submitted,
    /// exclusions do not apply here because the responses must stay
    /// positionally aligned with `Scenario::jobs`.
    #[instrument(level = "info", skip(self, scenarios, cache))]
    pub async fn enrich(
        &self,
        scenarios: &ScenarioStore,
        cache: &EnrichmentCache,
        date: DateKey,
    ) -> Result<Vec<EnhancedAddressResponse>, EnrichmentError> {
        if let Some(cached) = cache.enriched_for(date) {
            return Ok(cached);
        }

        let scenario = scenarios
            .scenario_for(date)
            .ok_or(EnrichmentError::ScenarioNotFound(date))?;

        let _guard = InFlightGuard::register(Arc::clone(&self.in_flight), date)
            .ok_or(EnrichmentError::AlreadyFetching(date))?;
        let _permit = self
            .permits
            .acquire()
            .await
            .expect("the enrichment semaphore is never closed");

        let payload: Vec<AppointmentPayload> =
            scenario.jobs.iter().map(AppointmentPayload::from).collect();

        let base_url = self.configurations.load().solver.base_url.clone();
        let url = format!("{}/api/appointments", base_url.trim_end_matches('/'));

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(EnrichmentError::Solver {
                date,
                status: response.status().as_u16(),
            });
        }

        let enrichment: EnrichmentResponse = response.json().await?;

        info!(
            %date,
            addresses = enrichment.address_responses.len(),
            errors = enrichment.errors.len(),
            "enrichment fetch completed"
        );

        // A late-arriving response still commits under its own date key;
        // the per-date cache slot makes this safe.
        cache.set_enriched_appointments(date, enrichment.address_responses.clone());

        Ok(enrichment.address_responses)
    }
}

/// Removes the date from the in-flight set when the fetch finishes,
/// whether it cached a result or errored out.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<DateKey>>>,
    date: DateKey,
}

impl InFlightGuard {
    fn register(in_flight: Arc<Mutex<HashSet<DateKey>>>, date: DateKey) -> Option<Self> {
        if !in_flight.lock().unwrap().insert(date) {
            return None;
        }
        Some(InFlightGuard { in_flight, date })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.lock().unwrap().remove(&self.date);
    }
}
