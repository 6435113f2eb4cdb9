//! Builds the network summary report: load or generate a network, then write CSV and JSON.

use social_report::config::ReportConfig;
use social_report::render::{write_csv_file, write_json_file};
use social_report::report::{build_report, load_graph};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let started = Instant::now();
    let config = ReportConfig::from_env()?;
    let graph = Arc::new(load_graph(&config)?);
    let report = build_report(graph, config.limits).await?;

    write_csv_file(&config.output, &report)?;
    if let Some(path) = &config.json_output {
        write_json_file(path, &report)?;
    }

    let elapsed = started.elapsed().as_secs_f64();
    let minutes = (elapsed / 60.0).floor();
    let seconds = elapsed - minutes * 60.0;
    tracing::info!(
        "Total execution time: {} minutes and {:.2} seconds",
        minutes as u64,
        seconds
    );
    Ok(())
}
