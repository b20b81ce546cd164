use anyhow::Context;
use anyhow::Result;
use routeplan_planning_environment::company::Address;
use routeplan_planning_environment::company::CompanyInfo;
use routeplan_planning_environment::company::CompanyVehicle;

/// Parses free-form `key,value` company CSV text.
///
/// Keys are lower-cased and matched by substring containment against the
/// three recognized labels; anything else is ignored without an error.
/// `"# of workers"` matches through the `workers` containment. When no
/// workers line is present the synthesized vehicle falls back to one
/// worker, matching the appointment-ingestion default.
pub fn parse_company_info(text: &str) -> Result<CompanyInfo> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut start_address = Address::blank();
    let mut finish_address = Address::blank();
    let mut worker_count: Option<u32> = None;

    for record in reader.records() {
        let record = record.context("company CSV could not be tokenized")?;

        let Some(key) = record.get(0) else { continue };
        let key = key.to_lowercase();
        let value = record.get(1).unwrap_or("");

        if key.contains("start address") {
            start_address = split_positional_address(value);
        } else if key.contains("finish address") {
            finish_address = split_positional_address(value);
        } else if key.contains("workers") {
            worker_count = value.trim().parse::<u32>().ok().or(worker_count);
        }
    }

    Ok(CompanyInfo {
        start_address,
        finish_address,
        vehicles: vec![CompanyVehicle {
            id: 0,
            skills: None,
            worker_amount: worker_count.unwrap_or(1),
        }],
    })
}

/// Splits an address string into its three positional parts. Missing parts
/// become the empty string; extra parts are dropped.
fn split_positional_address(value: &str) -> Address {
    let mut parts = value.split(',').map(str::trim);

    Address {
        street: parts.next().unwrap_or("").to_string(),
        zip_code: parts.next().unwrap_or("").to_string(),
        city: parts.next().unwrap_or("").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "\
Start Address,\"Main St 1, 10115, Berlin\"
Finish Address,\"Side St 2, 10117, Berlin\"
# of Workers,4
";

    #[test]
    fn canonical_company_csv_round_trips() {
        let info = parse_company_info(CANONICAL).unwrap();

        assert_eq!(info.start_address.street, "Main St 1");
        assert_eq!(info.start_address.zip_code, "10115");
        assert_eq!(info.start_address.city, "Berlin");

        assert_eq!(info.finish_address.street, "Side St 2");
        assert_eq!(info.finish_address.zip_code, "10117");
        assert_eq!(info.finish_address.city, "Berlin");

        assert_eq!(info.vehicles.len(), 1);
        assert_eq!(info.vehicles[0].worker_amount, 4);
    }

    #[test]
    fn unrecognized_lines_are_ignored_without_error() {
        let text = "\
Company Name,ACME Field Services
Start Address,\"Main St 1, 10115, Berlin\"
Some Other Key,whatever
";
        let info = parse_company_info(text).unwrap();

        assert_eq!(info.start_address.street, "Main St 1");
        assert_eq!(info.finish_address, Address::blank());
    }

    #[test]
    fn short_addresses_pad_with_empty_strings_and_long_ones_drop_extras() {
        let short = split_positional_address("Main St 1");
        assert_eq!(short.street, "Main St 1");
        assert_eq!(short.zip_code, "");
        assert_eq!(short.city, "");

        let long = split_positional_address("Main St 1, 10115, Berlin, Germany, Earth");
        assert_eq!(long.city, "Berlin");
    }

    #[test]
    fn missing_workers_line_falls_back_to_one_worker() {
        let info = parse_company_info("Start Address,\"Main St 1, 10115, Berlin\"\n").unwrap();

        assert_eq!(info.vehicles[0].worker_amount, 1);
    }
}
