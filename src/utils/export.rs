use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::config::Variant;
use crate::models::output::OutputRow;

/// Write the snapshot rows to a CSV file, replacing any existing file.
///
/// The header always matches the variant, so an empty row set still
/// produces a header-only file.
pub fn write_output_csv(rows: &[OutputRow], variant: Variant, path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV {}: {}", path.display(), e)))?;

    wtr.write_record(variant.columns())?;

    for row in rows {
        let mut record = vec![
            row.symbol.clone(),
            row.usd.map(format_float).unwrap_or_default(),
            format_float(row.usd_market_cap),
        ];
        if variant == Variant::Ranked {
            record.push(
                row.market_cap_rank
                    .map(|rank| rank.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Shortest round-trip form, no trailing `.0` on whole numbers.
fn format_float(v: f64) -> String {
    v.to_string()
}
