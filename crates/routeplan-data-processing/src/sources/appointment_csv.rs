use std::collections::BTreeMap;

use anyhow::Context;
use anyhow::Result;
use routeplan_planning_environment::DateKey;
use routeplan_planning_environment::scenario::Scenario;
use routeplan_planning_environment::scenario::job::Job;
use thiserror::Error;
use tracing::warn;

use super::parse_timestamp;

/// Field order of an appointment record. The header line is read and
/// discarded; fields are positional, never matched by name.
const START: usize = 0;
const END: usize = 1;
const STREET: usize = 2;
const ZIP: usize = 3;
const CITY: usize = 4;
const WORKERS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowError {
    #[error("field {index} is missing")]
    MissingField { index: usize },
    #[error("'{value}' is not a parsable timestamp")]
    InvalidTimestamp { value: String },
    #[error("'{value}' is not a base-10 worker count")]
    InvalidWorkerCount { value: String },
}

/// A source row that did not survive validation. Invalid rows never enter
/// a scenario; they are collected here so the caller can report them.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number in the source text, counting the header.
    pub line: u64,
    pub raw: String,
    pub reason: RowError,
}

/// Outcome of one appointment upload: the per-day scenarios built from the
/// valid rows, plus every row that was rejected. The caller decides what to
/// do with the rejects; bucketing has already ignored them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParse {
    pub scenarios: Vec<Scenario>,
    pub rejected: Vec<RejectedRow>,
}

enum RowOutcome {
    Ok(Job),
    Invalid(RejectedRow),
}

/// Parses raw appointment CSV text and buckets the jobs into one scenario
/// per calendar day.
///
/// Tokenization follows the quoted-or-bare grammar: a double-quoted field
/// keeps embedded commas and loses its surrounding quotes. Grouping is by
/// the local-midnight normalization of `start`; within a day, job order is
/// the order encountered in the source text. Each scenario carries exactly
/// one synthesized default vehicle.
pub fn parse_appointments(text: &str) -> Result<ScenarioParse> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut jobs: Vec<Job> = Vec::new();
    let mut rejected: Vec<RejectedRow> = Vec::new();

    for record in reader.records() {
        let record = record.context("appointment CSV could not be tokenized")?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        match parse_row(&record) {
            RowOutcome::Ok(job) => jobs.push(job),
            RowOutcome::Invalid(reject) => {
                warn!(
                    line = reject.line,
                    reason = %reject.reason,
                    "rejecting appointment row"
                );
                rejected.push(reject);
            }
        }
    }

    Ok(ScenarioParse {
        scenarios: bucket_by_date(jobs),
        rejected,
    })
}

fn parse_row(record: &csv::StringRecord) -> RowOutcome {
    let line = record.position().map_or(0, |position| position.line());

    let reject = |reason: RowError| {
        RowOutcome::Invalid(RejectedRow {
            line,
            raw: record.iter().collect::<Vec<_>>().join(","),
            reason,
        })
    };

    let field = |index: usize| -> Result<&str, RowError> {
        record.get(index).ok_or(RowError::MissingField { index })
    };

    let start = match field(START).and_then(parse_timestamp) {
        Ok(start) => start,
        Err(reason) => return reject(reason),
    };
    let end = match field(END).and_then(parse_timestamp) {
        Ok(end) => end,
        Err(reason) => return reject(reason),
    };
    let street = match field(STREET) {
        Ok(street) => street.to_string(),
        Err(reason) => return reject(reason),
    };
    let zip = match field(ZIP) {
        Ok(zip) => zip.to_string(),
        Err(reason) => return reject(reason),
    };
    let city = match field(CITY) {
        Ok(city) => city.to_string(),
        Err(reason) => return reject(reason),
    };
    let workers = match field(WORKERS) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(workers) => workers,
            Err(_) => {
                return reject(RowError::InvalidWorkerCount {
                    value: raw.to_string(),
                });
            }
        },
        Err(reason) => return reject(reason),
    };

    RowOutcome::Ok(Job {
        start,
        end,
        street,
        zip,
        city,
        workers,
        // The appointment source format carries no skills column.
        skills: None,
    })
}

/// Two jobs belong to the same scenario iff their start timestamps
/// normalize to the same local midnight. Scenarios come out date-sorted;
/// job order within a day stays source order.
fn bucket_by_date(jobs: Vec<Job>) -> Vec<Scenario> {
    let mut buckets: BTreeMap<DateKey, Vec<Job>> = BTreeMap::new();

    for job in jobs {
        buckets.entry(job.date_key()).or_default().push(job);
    }

    buckets
        .into_iter()
        .map(|(date, jobs)| Scenario::builder(date).jobs(jobs).build())
        .collect()
}

#[cfg(test)]
mod tests {
    use routeplan_planning_environment::scenario::Vehicle;

    use super::*;

    const CANONICAL: &str = "\
start,end,street,zip,city,workers
2024-05-01T08:00:00,2024-05-01T09:00:00,\"Main St 1\",10115,Berlin,2
2024-05-01T10:00:00,2024-05-01T11:00:00,Side St 2,10117,Berlin,1
2024-05-02T08:00:00,2024-05-02T09:00:00,Third St 3,10119,Berlin,3
";

    #[test]
    fn jobs_on_the_same_local_day_land_in_exactly_one_scenario() {
        let parse = parse_appointments(CANONICAL).unwrap();

        assert!(parse.rejected.is_empty());
        assert_eq!(parse.scenarios.len(), 2);

        let first = &parse.scenarios[0];
        assert_eq!(first.date.to_string(), "2024-05-01");
        assert_eq!(first.jobs.len(), 2);
        assert_eq!(first.jobs[0].street, "Main St 1");
        assert_eq!(first.jobs[1].street, "Side St 2");

        let second = &parse.scenarios[1];
        assert_eq!(second.date.to_string(), "2024-05-02");
        assert_eq!(second.jobs.len(), 1);
    }

    #[test]
    fn every_scenario_carries_one_synthesized_default_vehicle() {
        let parse = parse_appointments(CANONICAL).unwrap();

        for scenario in &parse.scenarios {
            assert_eq!(scenario.vehicles, vec![Vehicle::synthesized_default()]);
        }
    }

    #[test]
    fn quoted_streets_keep_embedded_commas() {
        let text = "\
start,end,street,zip,city,workers
2024-05-01T08:00:00,2024-05-01T09:00:00,\"Main St, Suite 4\",10115,Berlin,2
";
        let parse = parse_appointments(text).unwrap();

        assert_eq!(parse.scenarios.len(), 1);
        let job = &parse.scenarios[0].jobs[0];
        assert_eq!(job.street, "Main St, Suite 4");
        assert_eq!(job.zip, "10115");
        assert_eq!(job.city, "Berlin");
        assert_eq!(job.workers, 2);
    }

    #[test]
    fn rejects_rows_with_malformed_timestamps() {
        let text = "\
start,end,street,zip,city,workers
not-a-date,2024-05-01T09:00:00,Main St 1,10115,Berlin,2
2024-05-01T08:00:00,2024-05-01T09:00:00,Main St 1,10115,Berlin,2
";
        let parse = parse_appointments(text).unwrap();

        assert_eq!(parse.scenarios.len(), 1);
        assert_eq!(parse.scenarios[0].jobs.len(), 1);
        assert_eq!(parse.rejected.len(), 1);
        assert_eq!(parse.rejected[0].line, 2);
        assert!(matches!(
            parse.rejected[0].reason,
            RowError::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn rejects_rows_with_non_numeric_worker_counts() {
        let text = "\
start,end,street,zip,city,workers
2024-05-01T08:00:00,2024-05-01T09:00:00,Main St 1,10115,Berlin,two
";
        let parse = parse_appointments(text).unwrap();

        assert!(parse.scenarios.is_empty());
        assert!(matches!(
            parse.rejected[0].reason,
            RowError::InvalidWorkerCount { .. }
        ));
    }

    #[test]
    fn blank_lines_are_skipped_without_being_reported() {
        let text = "\
start,end,street,zip,city,workers
2024-05-01T08:00:00,2024-05-01T09:00:00,Main St 1,10115,Berlin,2

";
        let parse = parse_appointments(text).unwrap();

        assert_eq!(parse.scenarios.len(), 1);
        assert!(parse.rejected.is_empty());
    }
}
