pub mod company;
pub mod scenario;

use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// Key of every per-date store in the system: the local-midnight
/// normalization of a job's start timestamp.
///
/// Two jobs belong to the same scenario iff their `start` timestamps
/// normalize to the same `DateKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateKey(pub NaiveDate);

impl DateKey {
    pub fn from_start(start: NaiveDateTime) -> Self {
        DateKey(start.date())
    }

    /// Midnight of the day, the normalized timestamp the stores key on.
    pub fn local_midnight(&self) -> NaiveDateTime {
        self.0.and_hms_opt(0, 0, 0).expect("midnight is always a valid time")
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DateKey(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::DateKey;

    #[test]
    fn date_key_normalizes_any_time_of_day_to_the_same_key() {
        let morning = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let evening = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();

        assert_eq!(DateKey::from_start(morning), DateKey::from_start(evening));
        assert_eq!(
            DateKey::from_start(morning).local_midnight(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn date_key_round_trips_through_its_display_form() {
        let key: DateKey = "2024-05-01".parse().unwrap();
        assert_eq!(key.to_string(), "2024-05-01");
    }
}
