use std::path::PathBuf;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::data::{loader, resolver};
use crate::errors::AppError;
use crate::models::config::{PipelineConfig, Variant};
use crate::models::token::{ID_COL, SYMBOL_COL};
use crate::provider::PriceApi;
use crate::utils::export;

use super::merger::merge_and_filter;
use super::prices::fetch_prices;
use super::ranks::fetch_ranks;

/// What one run did.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub variant: Variant,
    pub resolved_ids: usize,
    pub priced_ids: usize,
    pub ranked_ids: usize,
    pub rows_written: usize,
    /// Set when the price batch failed and the snapshot was written empty.
    pub price_failure: Option<String>,
    /// Identifiers whose rank lookup failed.
    pub rank_failures: Vec<String>,
    pub output_path: PathBuf,
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run the snapshot once: load, resolve, fetch, merge, write.
///
/// Reference-load and write failures abort with an error. A failed price
/// batch or rank lookup only shrinks the output. `http` fetches remote
/// reference files.
pub async fn run_pipeline(
    config: &PipelineConfig,
    api: &dyn PriceApi,
    http: &Client,
) -> Result<PipelineReport, AppError> {
    info!("Running snapshot: variant={}, output={}", config.variant, config.output_path.display());

    // ── 1. Reference data ──
    let tokens = loader::load_reference(http, &config.tokens_location).await?;
    loader::require_columns(&tokens, &config.tokens_location, &[SYMBOL_COL])?;
    let mapping = loader::load_reference(http, &config.mapping_location).await?;
    loader::require_columns(&mapping, &config.mapping_location, &[SYMBOL_COL, ID_COL])?;

    // ── 2. Identifiers ──
    let ids = resolver::resolve_identifiers(&tokens, &mapping)?;

    // ── 3. Prices ──
    let batch = fetch_prices(api, &ids).await;
    if let Some(reason) = batch.failure() {
        warn!("Price batch failed, snapshot will be empty: {}", reason);
    }
    let priced_ids = batch.ids();

    // ── 4. Ranks ──
    let (ranks, rank_failures) = match config.variant {
        Variant::Basic => (None, Vec::new()),
        Variant::Ranked => {
            let (ranks, failures) = fetch_ranks(api, &priced_ids).await;
            (Some(ranks), failures)
        }
    };
    let ranked_ids = ranks.as_ref().map_or(0, |r| r.len());

    // ── 5. Merge and filter ──
    let rows = merge_and_filter(batch.records(), &mapping, ranks.as_deref())?;

    // ── 6. Write ──
    export::write_output_csv(&rows, config.variant, &config.output_path)?;

    let report = PipelineReport {
        variant: config.variant,
        resolved_ids: ids.len(),
        priced_ids: priced_ids.len(),
        ranked_ids,
        rows_written: rows.len(),
        price_failure: batch.failure().map(str::to_string),
        rank_failures,
        output_path: config.output_path.clone(),
        finished_at: Utc::now(),
    };
    info!(
        "Snapshot complete: {} resolved, {} priced, {} rows written",
        report.resolved_ids, report.priced_ids, report.rows_written
    );
    Ok(report)
}
