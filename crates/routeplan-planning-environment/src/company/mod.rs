use serde::Deserialize;
use serde::Serialize;

/// Street-level address, every part possibly empty. Emptiness is only
/// judged by the external solver; the planning core never validates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip_code: String,
    pub city: String,
}

impl Address {
    pub fn blank() -> Self {
        Address::default()
    }
}

/// Per-day depot configuration used as optimization input: where vehicles
/// start and finish, and the worker capacity of each vehicle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyInfo {
    pub start_address: Address,
    pub finish_address: Address,
    pub vehicles: Vec<CompanyVehicle>,
}

impl CompanyInfo {
    /// The blank default written by a reset: empty addresses, no vehicles.
    pub fn blank() -> Self {
        CompanyInfo::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyVehicle {
    pub id: u32,
    pub skills: Option<String>,
    pub worker_amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_company_info_has_empty_addresses_and_no_vehicles() {
        let blank = CompanyInfo::blank();

        assert_eq!(blank.start_address, Address::blank());
        assert_eq!(blank.finish_address, Address::blank());
        assert!(blank.vehicles.is_empty());
    }
}
