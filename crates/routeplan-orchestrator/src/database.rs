use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use routeplan_contracts::enrichment::EnhancedAddressResponse;
use routeplan_planning_environment::DateKey;
use routeplan_planning_environment::company::CompanyInfo;
use routeplan_planning_environment::scenario::Scenario;
use serde::Deserialize;
use serde::Serialize;

/// The durable image of the four stores. Each store persists its whole
/// state; there is no per-key journaling because every mutation in the
/// system is already a whole-value replacement.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    pub scenarios: Vec<Scenario>,
    pub company_info: HashMap<DateKey, CompanyInfo>,
    pub excluded_appointments: HashMap<DateKey, BTreeSet<usize>>,
    pub enriched_appointments: HashMap<DateKey, Vec<EnhancedAddressResponse>>,
}

/// JSON-file persistence for the orchestrator state. Loaded once on
/// startup if the file exists; written in full after every mutation.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: PathBuf) -> Self {
        Database { path }
    }

    pub fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read the database file at {}", self.path.display()))?;
        let state = serde_json::from_str(&contents)
            .with_context(|| format!("{} does not hold a valid state image", self.path.display()))?;

        Ok(Some(state))
    }

    pub fn persist(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("could not create the database directory {}", parent.display())
                })?;
            }
        }

        let contents =
            serde_json::to_string(state).context("the orchestrator state could not be serialized")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("could not write the database file at {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn persisted_state_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("routeplan.json"));

        let date = DateKey(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let mut state = PersistedState {
            scenarios: vec![Scenario::builder(date).build()],
            ..PersistedState::default()
        };
        state.excluded_appointments.insert(date, BTreeSet::from([0, 2]));
        state.company_info.insert(date, CompanyInfo::blank());
        state.enriched_appointments.insert(
            date,
            vec![EnhancedAddressResponse {
                could_be_fully_found: false,
                error_information: Some("Address could not be found".to_string()),
                street: "Main St 1".to_string(),
                zipcode: "10115".to_string(),
                city: "Berlin".to_string(),
                latitude: None,
                longitude: None,
            }],
        );

        database.persist(&state).unwrap();
        let loaded = database.load().unwrap().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn a_missing_database_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("absent.json"));

        assert!(database.load().unwrap().is_none());
    }
}
