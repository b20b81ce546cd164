use routeplan_planning_environment::company::Address;
use routeplan_planning_environment::company::CompanyInfo;
use routeplan_planning_environment::scenario::job::Job;
use serde::Deserialize;
use serde::Serialize;

/// Wire format of the timestamps the solver accepts, ISO-8601 without an
/// offset. The solver also accepts a trailing `Z`; we never emit one.
const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One retained job as the solver expects it on `POST /api/appointments`
/// and inside an [`OptimizationRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentPayload {
    pub appointment_start: String,
    pub appointment_end: String,
    pub address: Address,
    pub number_of_workers: u32,
}

impl From<&Job> for AppointmentPayload {
    fn from(job: &Job) -> Self {
        AppointmentPayload {
            appointment_start: job.start.format(APPOINTMENT_TIME_FORMAT).to_string(),
            appointment_end: job.end.format(APPOINTMENT_TIME_FORMAT).to_string(),
            address: Address {
                street: job.street.clone(),
                zip_code: job.zip.clone(),
                city: job.city.clone(),
            },
            number_of_workers: job.workers,
        }
    }
}

/// The payload sent to the external route-optimization solver for one day.
/// Ephemeral: assembled on demand by the request builder, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationRequest {
    pub company_info: CompanyInfo,
    pub appointments: Vec<AppointmentPayload>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn appointment_payload_formats_timestamps_as_iso_8601() {
        let job = Job {
            start: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            street: "Main St 1".to_string(),
            zip: "10115".to_string(),
            city: "Berlin".to_string(),
            workers: 2,
            skills: None,
        };

        let payload = AppointmentPayload::from(&job);

        assert_eq!(payload.appointment_start, "2024-05-01T08:00:00");
        assert_eq!(payload.appointment_end, "2024-05-01T09:30:00");
        assert_eq!(payload.address.street, "Main St 1");
        assert_eq!(payload.address.zip_code, "10115");
        assert_eq!(payload.number_of_workers, 2);
    }
}
