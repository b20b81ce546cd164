pub mod sources;

pub use sources::appointment_csv::RejectedRow;
pub use sources::appointment_csv::RowError;
pub use sources::appointment_csv::ScenarioParse;
pub use sources::appointment_csv::parse_appointments;
pub use sources::company_csv::parse_company_info;
