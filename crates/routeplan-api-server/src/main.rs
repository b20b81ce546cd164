mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use axum::Router;
use routeplan_configuration::SystemConfigurations;
use routeplan_orchestrator::Orchestrator;
use routeplan_orchestrator::logging;
use routes::api::v1::api_scope;
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv()
        .context("You need to provide an .env file. Look at the .env.example for guidance")?;

    let _guard = logging::setup_logging().context("logging could not be initialized")?;

    let configurations = SystemConfigurations::read_all_configs()
        .context("the system configuration could not be read")?;

    let orchestrator =
        Arc::new(Orchestrator::new(configurations).context("the orchestrator could not be created")?);

    let planner_files = ServeDir::new("./static_files/planner/dist");

    let app = Router::new()
        .nest("/api/v1", api_scope(orchestrator.clone()))
        .nest_service("/planner", planner_files)
        .with_state(orchestrator);

    let addr: SocketAddr = dotenvy::var("ROUTEPLAN_API_ADDRESS")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .context("ROUTEPLAN_API_ADDRESS is not a valid socket address")?;

    info!(%addr, "api server listening");

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
