use anyhow::Context;
use anyhow::Result;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global tracing subscriber: a JSON file layer in the
/// directory named by `ROUTEPLAN_LOG_DIR`, filtered by `TRACING_LEVEL`.
/// The returned guard must be held for the lifetime of the process or the
/// non-blocking writer drops buffered events on shutdown.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = dotenvy::var("ROUTEPLAN_LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create the log directory {log_dir}"))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "routeplan.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_filter(
            EnvFilter::try_from_env("TRACING_LEVEL").unwrap_or_else(|_| EnvFilter::new("info")),
        );

    tracing_subscriber::registry().with(file_layer).init();

    event!(Level::INFO, "logging started");

    Ok(guard)
}
