pub mod appointment_csv;
pub mod company_csv;

use chrono::NaiveDateTime;

use self::appointment_csv::RowError;

/// Timestamp formats accepted from source data. ISO-8601 seconds
/// resolution, optional fractional seconds, optional trailing `Z`, and the
/// space-separated variant some exports produce.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, RowError> {
    let trimmed = raw.trim().trim_end_matches('Z');

    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp);
        }
    }

    Err(RowError::InvalidTimestamp {
        value: raw.to_string(),
    })
}
