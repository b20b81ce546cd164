use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Subcommand;

/// One HTTP exchange against the api server, fully described before it is
/// sent. Paths are relative to the `/api/v1` scope.
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload an appointment CSV and replace all scenarios
    Upload { file: PathBuf },
    /// List the current scenarios
    Scenarios,
    /// Assemble the optimization request for one date
    Request { date: String },
    /// Fetch (or read back) enriched addresses for one date
    Enrich { date: String },
    /// Toggle the exclusion of one appointment index for a date
    Exclude { date: String, idx: usize },
    /// Drop every exclusion stored for a date
    ClearExclusions { date: String },
    /// Manage the per-date company info
    CompanyInfo {
        #[clap(subcommand)]
        company_info_commands: CompanyInfoCommands,
    },
}

#[derive(Subcommand)]
pub enum CompanyInfoCommands {
    /// Upload a company CSV for a date
    Upload { date: String, file: PathBuf },
    /// Show the company info stored for a date
    Show { date: String },
    /// Reset a date's company info to blank values
    Reset { date: String },
}

pub fn handle_command(command: Commands) -> Result<ApiCall> {
    let api_call = match command {
        Commands::Upload { file } => ApiCall {
            method: Method::Post,
            path: "/scenarios".to_string(),
            body: Some(read_csv(&file)?),
        },
        Commands::Scenarios => ApiCall {
            method: Method::Get,
            path: "/scenarios".to_string(),
            body: None,
        },
        Commands::Request { date } => ApiCall {
            method: Method::Get,
            path: format!("/scenarios/{date}/request"),
            body: None,
        },
        Commands::Enrich { date } => ApiCall {
            method: Method::Post,
            path: format!("/scenarios/{date}/enrich"),
            body: None,
        },
        Commands::Exclude { date, idx } => ApiCall {
            method: Method::Post,
            path: format!("/scenarios/{date}/exclusions/{idx}"),
            body: None,
        },
        Commands::ClearExclusions { date } => ApiCall {
            method: Method::Delete,
            path: format!("/scenarios/{date}/exclusions"),
            body: None,
        },
        Commands::CompanyInfo {
            company_info_commands,
        } => match company_info_commands {
            CompanyInfoCommands::Upload { date, file } => ApiCall {
                method: Method::Post,
                path: format!("/company-info/{date}"),
                body: Some(read_csv(&file)?),
            },
            CompanyInfoCommands::Show { date } => ApiCall {
                method: Method::Get,
                path: format!("/company-info/{date}"),
                body: None,
            },
            CompanyInfoCommands::Reset { date } => ApiCall {
                method: Method::Delete,
                path: format!("/company-info/{date}"),
                body: None,
            },
        },
    };

    Ok(api_call)
}

fn read_csv(file: &PathBuf) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("could not read {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_toggles_are_addressed_by_date_and_index() {
        let api_call = handle_command(Commands::Exclude {
            date: "2024-05-01".to_string(),
            idx: 7,
        })
        .unwrap();

        assert_eq!(api_call.path, "/scenarios/2024-05-01/exclusions/7");
        assert!(api_call.body.is_none());
    }

    #[test]
    fn uploading_a_missing_file_is_an_error() {
        let result = handle_command(Commands::Upload {
            file: PathBuf::from("/definitely/not/here.csv"),
        });

        assert!(result.is_err());
    }
}
