pub mod job;

use serde::Deserialize;
use serde::Serialize;

use self::job::Job;
use crate::DateKey;

/// The planning unit of the whole system: all jobs of one calendar day
/// together with the vehicles available on that day.
///
/// At most one `Scenario` exists per distinct `DateKey` at any time. The
/// job order is the order the rows were encountered in the source data,
/// never re-sorted; exclusion indices and enrichment entries are aligned
/// with it positionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub date: DateKey,
    pub jobs: Vec<Job>,
    pub vehicles: Vec<Vehicle>,
}

impl Scenario {
    pub fn builder(date: DateKey) -> ScenarioBuilder {
        ScenarioBuilder {
            date,
            jobs: Vec::new(),
            vehicles: Vec::new(),
        }
    }
}

pub struct ScenarioBuilder {
    date: DateKey,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
}

impl ScenarioBuilder {
    pub fn build(self) -> Scenario {
        Scenario {
            date: self.date,
            jobs: self.jobs,
            vehicles: if self.vehicles.is_empty() {
                vec![Vehicle::synthesized_default()]
            } else {
                self.vehicles
            },
        }
    }

    pub fn jobs(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn vehicles(mut self, vehicles: Vec<Vehicle>) -> Self {
        self.vehicles = vehicles;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: u32,
    pub capacity: u32,
    pub skills: Vec<String>,
    pub workers: u32,
}

impl Vehicle {
    /// The fixed default synthesized during appointment ingestion, one per
    /// scenario rather than one per job.
    pub fn synthesized_default() -> Self {
        Vehicle {
            id: 0,
            capacity: 0,
            skills: Vec::new(),
            workers: 1,
        }
    }
}
