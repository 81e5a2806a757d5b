use std::io::Cursor;

use polars::prelude::*;
use reqwest::Client;
use tracing::info;

use crate::errors::AppError;

/// True for `http://` and `https://` locations.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Load a reference CSV from a local path or an http(s) URL.
///
/// Columns and row order are kept exactly as in the source. Any fetch or
/// parse failure is reported as [`AppError::SourceUnavailable`].
pub async fn load_reference(client: &Client, location: &str) -> Result<DataFrame, AppError> {
    let bytes = if is_remote(location) {
        fetch_remote(client, location).await?
    } else {
        tokio::fs::read(location)
            .await
            .map_err(|e| AppError::unavailable(location, e))?
    };

    let df = parse_csv(location, bytes)?;
    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        location
    );
    Ok(df)
}

async fn fetch_remote(client: &Client, location: &str) -> Result<Vec<u8>, AppError> {
    let response = client
        .get(location)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::unavailable(location, e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::unavailable(location, e))?;
    Ok(bytes.to_vec())
}

/// Parse CSV bytes with a header row. Every column is read as text, so
/// values like `007` survive untouched and late rows never break inference.
pub fn parse_csv(location: &str, bytes: Vec<u8>) -> Result<DataFrame, AppError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| AppError::unavailable(location, e))
}

/// Fail with `SourceUnavailable` unless every named column is present.
pub fn require_columns(df: &DataFrame, location: &str, columns: &[&str]) -> Result<(), AppError> {
    for name in columns {
        if df.column(name).is_err() {
            return Err(AppError::unavailable(
                location,
                format!("missing column '{}'", name),
            ));
        }
    }
    Ok(())
}
