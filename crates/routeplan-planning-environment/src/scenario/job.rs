use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::DateKey;

/// A single service visit: time window, address, and worker requirement.
///
/// Immutable once created. Jobs are referenced only by their position in
/// `Scenario::jobs`; nothing in the system carries a job id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub workers: u32,
    /// The appointment source format carries no skills column, so this is
    /// `None` for every ingested job. Kept on the type because vehicles
    /// match on skills and future sources may provide them.
    pub skills: Option<Vec<String>>,
}

impl Job {
    pub fn date_key(&self) -> DateKey {
        DateKey::from_start(self.start)
    }
}
