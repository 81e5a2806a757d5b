use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_REFERENCE_BASE: &str =
    "https://raw.githubusercontent.com/ereboreum/important-docs/main/";
pub const DEFAULT_TOKENS_FILE: &str = "indata.csv";
pub const DEFAULT_MAPPING_FILE: &str = "symbol-ids.csv";
pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_OUTPUT_FILE: &str = "prc_data.csv";

/// Which columns the snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// symbol, usd, usd_market_cap
    Basic,
    /// Adds market_cap_rank, fetched one coin at a time.
    #[default]
    Ranked,
}

impl Variant {
    /// Output header for this variant.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Variant::Basic => &["symbol", "usd", "usd_market_cap"],
            Variant::Ranked => &["symbol", "usd", "usd_market_cap", "market_cap_rank"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Ranked => "ranked",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Variant::Basic),
            "ranked" => Ok(Variant::Ranked),
            _ => Err(format!("Unknown variant: {}", s)),
        }
    }
}

/// Everything a run needs. The defaults are the fixed production locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Token list: a local path or an http(s) URL. Needs a `symbol` column.
    pub tokens_location: String,
    /// Symbol to identifier mapping. Needs `symbol` and `id` columns.
    pub mapping_location: String,
    /// Base URL of the price API, without trailing slash.
    pub api_base: String,
    pub output_path: PathBuf,
    pub variant: Variant,
    /// `None` keeps the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tokens_location: format!("{}{}", DEFAULT_REFERENCE_BASE, DEFAULT_TOKENS_FILE),
            mapping_location: format!("{}{}", DEFAULT_REFERENCE_BASE, DEFAULT_MAPPING_FILE),
            api_base: DEFAULT_API_BASE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            variant: Variant::default(),
            request_timeout_secs: None,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tokens_location.trim().is_empty() {
            return Err(AppError::InvalidConfig("tokens_location is empty".into()));
        }
        if self.mapping_location.trim().is_empty() {
            return Err(AppError::InvalidConfig("mapping_location is empty".into()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(AppError::InvalidConfig(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("output_path is empty".into()));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(AppError::InvalidConfig("request_timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
