//! Price API seam.
//!
//! The pipeline only talks to [`PriceApi`]. [`coingecko::CoinGeckoClient`] is
//! the production implementation; tests substitute an in-memory one.

pub mod coingecko;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;

pub use coingecko::CoinGeckoClient;

/// Price entry of a batched quote, keyed by identifier in the response.
/// CoinGecko omits fields it has no value for, so both are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimplePrice {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
}

#[async_trait]
pub trait PriceApi: Send + Sync {
    /// Current usd price and market cap for every identifier, in one request.
    ///
    /// Identifiers the API does not know are simply missing from the map.
    /// Failures are reported as [`AppError::BatchFetch`].
    async fn simple_price(&self, ids: &[String]) -> Result<HashMap<String, SimplePrice>, AppError>;

    /// Market-cap rank of a single coin. `Ok(None)` when the coin is unranked.
    /// Failures are reported as [`AppError::ItemFetch`].
    async fn coin_rank(&self, id: &str) -> Result<Option<u32>, AppError>;
}

/// Build the HTTP client shared by the reference loader and the price API.
/// `None` keeps reqwest's default timeout.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, AppError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Ranks come back as integers, occasionally as floats. Zero means unranked.
pub(crate) fn rank_from_value(raw: Option<f64>) -> Option<u32> {
    match raw {
        Some(r) if r.is_finite() && r >= 1.0 && r <= u32::MAX as f64 => Some(r as u32),
        _ => None,
    }
}
