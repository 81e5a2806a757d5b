/// All application errors, categorized by pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Reference data ──
    #[error("Reference source unavailable ({location}): {message}")]
    SourceUnavailable { location: String, message: String },

    // ── Price API ──
    #[error("Price batch request failed: {0}")]
    BatchFetch(String),

    #[error("Lookup failed for {id}: {message}")]
    ItemFetch { id: String, message: String },

    // ── Output ──
    #[error("Failed to write file: {0}")]
    FileWrite(String),

    // ── Tabular processing ──
    #[error("Dataframe error: {0}")]
    Dataframe(String),

    // ── Configuration ──
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Serialization ──
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── General ──
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            AppError::BatchFetch(_) => "BATCH_FETCH",
            AppError::ItemFetch { .. } => "ITEM_FETCH",
            AppError::FileWrite(_) => "FILE_WRITE",
            AppError::Dataframe(_) => "DATAFRAME",
            AppError::InvalidConfig(_) => "INVALID_CONFIG",
            AppError::Serialization(_) => "SERIALIZATION",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    /// Errors that abort the run. Everything else is degraded locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::BatchFetch(_) | AppError::ItemFetch { .. })
    }

    pub(crate) fn unavailable(location: &str, message: impl ToString) -> Self {
        AppError::SourceUnavailable {
            location: location.to_string(),
            message: message.to_string(),
        }
    }
}

// ── Conversions from external errors ──

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileWrite(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileWrite(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        AppError::Dataframe(err.to_string())
    }
}

/// Request failures are mapped to `BatchFetch`/`ItemFetch` at the call site.
/// What reaches this conversion is a client setup problem.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(format!("HTTP client error: {}", err))
    }
}
