use serde::Deserialize;
use serde::Serialize;

/// One geocoded address as returned by the solver, positionally aligned
/// with the appointment array of the request that produced it.
///
/// Note the field name `zipcode`: the enrichment response spells it without
/// the underscore while request addresses use `zip_code`. The asymmetry is
/// part of the wire protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancedAddressResponse {
    pub could_be_fully_found: bool,
    #[serde(default)]
    pub error_information: Option<String>,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Response body of `POST /api/appointments` on the external solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentResponse {
    pub address_responses: Vec<EnhancedAddressResponse>,
    pub errors: Vec<String>,
}
