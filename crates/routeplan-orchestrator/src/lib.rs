pub mod database;
pub mod enrichment;
pub mod logging;
pub mod request_builder;
pub mod stores;

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use arc_swap::ArcSwap;
use routeplan_configuration::SystemConfigurations;
use routeplan_contracts::enrichment::EnhancedAddressResponse;
use routeplan_contracts::optimization::OptimizationRequest;
pub use routeplan_planning_environment::DateKey;
use routeplan_planning_environment::company::CompanyInfo;
use routeplan_planning_environment::scenario::Scenario;
use tracing::instrument;

use self::database::Database;
use self::database::PersistedState;
use self::enrichment::EnrichmentError;
use self::enrichment::EnrichmentService;
use self::request_builder::RequestBuilderError;
use self::stores::CompanyInfoStore;
use self::stores::EnrichmentCache;
use self::stores::ExclusionStore;
use self::stores::ScenarioStore;

/// Owns the four independently-lifecycled stores and the services that
/// read them. Store handles are held here and passed explicitly into the
/// request builder and the enrichment service; nothing mutates ambient
/// global state.
///
/// Every mutating operation persists the complete store image afterwards,
/// so the state survives a process restart with exact round-trip fidelity.
pub struct Orchestrator {
    pub scenarios: ScenarioStore,
    pub company_info: CompanyInfoStore,
    pub exclusions: ExclusionStore,
    pub enrichment_cache: EnrichmentCache,
    pub enrichment: EnrichmentService,
    database: Database,
}

impl Orchestrator {
    pub fn new(configurations: Arc<ArcSwap<SystemConfigurations>>) -> Result<Self> {
        let database = Database::new(configurations.load().database_path.clone());

        let orchestrator = Orchestrator {
            scenarios: ScenarioStore::default(),
            company_info: CompanyInfoStore::default(),
            exclusions: ExclusionStore::default(),
            enrichment_cache: EnrichmentCache::default(),
            enrichment: EnrichmentService::new(Arc::clone(&configurations))
                .context("the enrichment service could not be created")?,
            database,
        };

        if let Some(state) = orchestrator.database.load()? {
            orchestrator.scenarios.set_scenarios(state.scenarios);
            orchestrator.company_info.restore(state.company_info);
            orchestrator.exclusions.restore(state.excluded_appointments);
            orchestrator.enrichment_cache.restore(state.enriched_appointments);
        }

        Ok(orchestrator)
    }

    /// Replaces the scenario list wholesale and cascades the invalidation:
    /// exclusion indices and enrichment entries are positional references
    /// into job arrays that no longer exist, so both stores are cleared
    /// rather than left pointing at jobs from a previous upload. Company
    /// info is not index-based and survives the replacement.
    #[instrument(level = "info", skip_all, fields(scenarios = scenarios.len()))]
    pub fn replace_scenarios(&self, scenarios: Vec<Scenario>) -> Result<()> {
        self.scenarios.set_scenarios(scenarios);
        self.exclusions.clear_all();
        self.enrichment_cache.clear_all();
        self.persist()
    }

    pub fn set_company_info(&self, date: DateKey, company_info: CompanyInfo) -> Result<()> {
        self.company_info.set_company_info(date, company_info);
        self.persist()
    }

    pub fn reset_company_info(&self, date: DateKey) -> Result<()> {
        self.company_info.reset_company_info(date);
        self.persist()
    }

    pub fn toggle_excluded_appointment(&self, date: DateKey, idx: usize) -> Result<()> {
        self.exclusions.toggle_excluded_appointment(date, idx);
        self.persist()
    }

    pub fn clear_excluded_appointments(&self, date: DateKey) -> Result<()> {
        self.exclusions.clear_excluded_appointments(date);
        self.persist()
    }

    /// Pure read-and-assemble over the three read-side stores.
    pub fn build_request(&self, date: DateKey) -> Result<OptimizationRequest, RequestBuilderError> {
        request_builder::build(&self.scenarios, &self.company_info, &self.exclusions, date)
    }

    pub async fn enrich(
        &self,
        date: DateKey,
    ) -> Result<Vec<EnhancedAddressResponse>, EnrichmentError> {
        let responses = self
            .enrichment
            .enrich(&self.scenarios, &self.enrichment_cache, date)
            .await?;

        if let Err(error) = self.persist() {
            // The cache entry is still live in memory; losing the durable
            // copy only costs a refetch after a restart.
            tracing::error!(%date, ?error, "could not persist the enrichment cache");
        }

        Ok(responses)
    }

    pub fn persist(&self) -> Result<()> {
        let state = PersistedState {
            scenarios: self.scenarios.all().as_ref().clone(),
            company_info: self.company_info.snapshot(),
            excluded_appointments: self.exclusions.snapshot(),
            enriched_appointments: self.enrichment_cache.snapshot(),
        };
        self.database.persist(&state)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use routeplan_configuration::EnrichmentConfiguration;
    use routeplan_configuration::SolverConfiguration;

    use super::*;

    fn configurations(dir: &std::path::Path) -> Arc<ArcSwap<SystemConfigurations>> {
        Arc::new(ArcSwap::new(Arc::new(SystemConfigurations {
            solver: SolverConfiguration {
                base_url: "http://127.0.0.1:9".to_string(),
                request_timeout_seconds: 1,
            },
            enrichment: EnrichmentConfiguration {
                max_concurrent_fetches: 2,
            },
            database_path: dir.join("routeplan.json"),
        })))
    }

    fn date(day: u32) -> DateKey {
        DateKey(NaiveDate::from_ymd_opt(2024, 5, day).unwrap())
    }

    #[test]
    fn replacing_scenarios_drops_exclusions_and_enrichment() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(configurations(dir.path())).unwrap();

        orchestrator
            .replace_scenarios(vec![Scenario::builder(date(1)).build()])
            .unwrap();
        orchestrator.toggle_excluded_appointment(date(1), 0).unwrap();
        orchestrator
            .enrichment_cache
            .set_enriched_appointments(date(1), Vec::new());

        orchestrator
            .replace_scenarios(vec![Scenario::builder(date(2)).build()])
            .unwrap();

        assert!(orchestrator.exclusions.excluded_for(date(1)).is_empty());
        assert!(orchestrator.enrichment_cache.enriched_for(date(1)).is_none());
        assert!(orchestrator.scenarios.scenario_for(date(1)).is_none());
        assert!(orchestrator.scenarios.scenario_for(date(2)).is_some());
    }

    #[test]
    fn company_info_survives_a_scenario_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(configurations(dir.path())).unwrap();

        orchestrator
            .set_company_info(date(1), CompanyInfo::blank())
            .unwrap();
        orchestrator
            .replace_scenarios(vec![Scenario::builder(date(2)).build()])
            .unwrap();

        assert!(orchestrator.company_info.company_info_for(date(1)).is_some());
    }

    #[test]
    fn the_full_store_state_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let orchestrator = Orchestrator::new(configurations(dir.path())).unwrap();
            orchestrator
                .replace_scenarios(vec![Scenario::builder(date(1)).build()])
                .unwrap();
            orchestrator.toggle_excluded_appointment(date(1), 3).unwrap();
            orchestrator
                .set_company_info(date(1), CompanyInfo::blank())
                .unwrap();
        }

        let restarted = Orchestrator::new(configurations(dir.path())).unwrap();

        assert!(restarted.scenarios.scenario_for(date(1)).is_some());
        assert_eq!(
            restarted.exclusions.excluded_for(date(1)),
            std::collections::BTreeSet::from([3])
        );
        assert!(restarted.company_info.company_info_for(date(1)).is_some());
    }
}
