use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use arc_swap::ArcSwap;
use routeplan_contracts::enrichment::EnhancedAddressResponse;
use routeplan_planning_environment::DateKey;
use routeplan_planning_environment::company::CompanyInfo;
use routeplan_planning_environment::scenario::Scenario;

/// Holds the current scenario list, replaced wholesale on every successful
/// appointment upload. There is no incremental merge: a date present before
/// but absent in the new list disappears.
///
/// Backed by `ArcSwap` because the only mutation is replace-the-whole-value;
/// readers never block a writer.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    inner: ArcSwap<Vec<Scenario>>,
}

impl ScenarioStore {
    pub fn set_scenarios(&self, scenarios: Vec<Scenario>) {
        self.inner.store(Arc::new(scenarios));
    }

    pub fn all(&self) -> Arc<Vec<Scenario>> {
        self.inner.load_full()
    }

    pub fn scenario_for(&self, date: DateKey) -> Option<Scenario> {
        self.inner
            .load()
            .iter()
            .find(|scenario| scenario.date == date)
            .cloned()
    }
}

/// Per-date map of depot configuration, independent of the scenario list.
/// Upserts replace the whole value for a date key; there is no field-level
/// merge.
#[derive(Debug, Default)]
pub struct CompanyInfoStore {
    inner: Mutex<HashMap<DateKey, CompanyInfo>>,
}

impl CompanyInfoStore {
    pub fn set_company_info(&self, date: DateKey, company_info: CompanyInfo) {
        self.inner.lock().unwrap().insert(date, company_info);
    }

    pub fn reset_company_info(&self, date: DateKey) {
        self.inner.lock().unwrap().insert(date, CompanyInfo::blank());
    }

    pub fn company_info_for(&self, date: DateKey) -> Option<CompanyInfo> {
        self.inner.lock().unwrap().get(&date).cloned()
    }

    pub fn snapshot(&self) -> HashMap<DateKey, CompanyInfo> {
        self.inner.lock().unwrap().clone()
    }

    pub fn restore(&self, state: HashMap<DateKey, CompanyInfo>) {
        *self.inner.lock().unwrap() = state;
    }
}

/// Per-date set of job indices the user has excluded from optimization.
/// Indices point into the day's `Scenario::jobs` and are never
/// range-checked here.
#[derive(Debug, Default)]
pub struct ExclusionStore {
    inner: Mutex<HashMap<DateKey, BTreeSet<usize>>>,
}

impl ExclusionStore {
    /// XOR membership: present means remove, absent means add. Applying the
    /// same toggle twice is a no-op.
    pub fn toggle_excluded_appointment(&self, date: DateKey, idx: usize) {
        let mut guard = self.inner.lock().unwrap();
        let set = guard.entry(date).or_default();
        if !set.insert(idx) {
            set.remove(&idx);
        }
    }

    pub fn clear_excluded_appointments(&self, date: DateKey) {
        self.inner.lock().unwrap().remove(&date);
    }

    pub fn clear_all(&self) {
        self.inner.lock().unwrap().clear();
    }

    pub fn excluded_for(&self, date: DateKey) -> BTreeSet<usize> {
        self.inner.lock().unwrap().get(&date).cloned().unwrap_or_default()
    }

    pub fn snapshot(&self) -> HashMap<DateKey, BTreeSet<usize>> {
        self.inner.lock().unwrap().clone()
    }

    pub fn restore(&self, state: HashMap<DateKey, BTreeSet<usize>>) {
        *self.inner.lock().unwrap() = state;
    }
}

/// Per-date cache of the solver's geocoding responses, positionally aligned
/// with the day's jobs. Entries are treated as permanently fresh until
/// explicitly cleared or cascaded away by a scenario replacement.
#[derive(Debug, Default)]
pub struct EnrichmentCache {
    inner: Mutex<HashMap<DateKey, Vec<EnhancedAddressResponse>>>,
}

impl EnrichmentCache {
    pub fn set_enriched_appointments(
        &self,
        date: DateKey,
        responses: Vec<EnhancedAddressResponse>,
    ) {
        self.inner.lock().unwrap().insert(date, responses);
    }

    pub fn clear_enriched_appointments(&self, date: DateKey) {
        self.inner.lock().unwrap().remove(&date);
    }

    pub fn clear_all(&self) {
        self.inner.lock().unwrap().clear();
    }

    pub fn enriched_for(&self, date: DateKey) -> Option<Vec<EnhancedAddressResponse>> {
        self.inner.lock().unwrap().get(&date).cloned()
    }

    pub fn snapshot(&self) -> HashMap<DateKey, Vec<EnhancedAddressResponse>> {
        self.inner.lock().unwrap().clone()
    }

    pub fn restore(&self, state: HashMap<DateKey, Vec<EnhancedAddressResponse>>) {
        *self.inner.lock().unwrap() = state;
    }
}
