use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use arc_swap::ArcSwap;
use serde::Deserialize;

/// Single source of all configuration in the system. The api-server loads
/// this once and hands it to the orchestrator; the orchestrator injects the
/// relevant pieces into the enrichment service and the database layer.
///
/// Always created wrapped in `Arc<ArcSwap<_>>` so a future reload never has
/// to chase stray unwrapped copies.
#[derive(Debug, Deserialize)]
pub struct SystemConfigurations {
    pub solver: SolverConfiguration,
    #[serde(default)]
    pub enrichment: EnrichmentConfiguration,
    #[serde(skip)]
    pub database_path: PathBuf,
}

/// Where the external VRP solver lives.
#[derive(Debug, Deserialize)]
pub struct SolverConfiguration {
    pub base_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Bounds for the enrichment fetch pool. Fetches are already deduplicated
/// per date key; this additionally caps how many distinct dates can be in
/// flight at once.
#[derive(Debug, Deserialize)]
pub struct EnrichmentConfiguration {
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for EnrichmentConfiguration {
    fn default() -> Self {
        EnrichmentConfiguration {
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_max_concurrent_fetches() -> usize {
    4
}

impl SystemConfigurations {
    pub fn read_all_configs() -> Result<Arc<ArcSwap<SystemConfigurations>>> {
        let config_path = dotenvy::var("ROUTEPLAN_CONFIG")
            .unwrap_or_else(|_| "./configuration/routeplan.toml".to_string());

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("could not read configuration file at {config_path}"))?;

        let mut configurations: SystemConfigurations = toml::from_str(&contents)
            .with_context(|| format!("{config_path} is not a valid configuration file"))?;

        let database_path = dotenvy::var("ROUTEPLAN_DATABASE_PATH")
            .context("The ROUTEPLAN_DATABASE_PATH environment variable has to be set")?;
        configurations.database_path = PathBuf::from(database_path);

        Ok(Arc::new(ArcSwap::new(Arc::new(configurations))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_parses_with_defaults_for_omitted_sections() {
        let contents = r#"
            [solver]
            base_url = "http://localhost:8080"
        "#;

        let configurations: SystemConfigurations = toml::from_str(contents).unwrap();

        assert_eq!(configurations.solver.base_url, "http://localhost:8080");
        assert_eq!(configurations.solver.request_timeout_seconds, 30);
        assert_eq!(configurations.enrichment.max_concurrent_fetches, 4);
    }
}
