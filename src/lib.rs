pub mod data;
pub mod engine;
pub mod errors;
pub mod models;
pub mod provider;
pub mod utils;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::engine::pipeline::{run_pipeline, PipelineReport};
use crate::errors::AppError;
use crate::models::config::PipelineConfig;
use crate::provider::{build_http_client, CoinGeckoClient};

/// Validate the configuration and run one snapshot against CoinGecko.
///
/// One HTTP client serves both the reference downloads and the price API.
pub async fn snapshot(config: &PipelineConfig) -> Result<PipelineReport, AppError> {
    config.validate()?;
    let http = build_http_client(config.request_timeout())?;
    let api = CoinGeckoClient::new(http.clone(), config.api_base.clone());
    run_pipeline(config, &api, &http).await
}

/// Binary entry point. Logs go to stderr; stdout only carries the rank trace.
pub fn run() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting price snapshot");

    let config = PipelineConfig::default();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(snapshot(&config)) {
        Ok(report) => {
            match report.to_json() {
                Ok(summary) => info!("Report: {}", summary),
                Err(e) => error!("Cannot encode report [{}]: {}", e.code(), e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Snapshot aborted [{}]: {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}
