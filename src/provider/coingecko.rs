//! CoinGecko v3 public API.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{rank_from_value, PriceApi, SimplePrice};
use crate::errors::AppError;

const VS_CURRENCY: &str = "usd";

/// Only the part of `/coins/{id}` we read.
#[derive(Debug, Deserialize)]
struct CoinDetail {
    #[serde(default)]
    market_cap_rank: Option<f64>,
}

pub struct CoinGeckoClient {
    client: Client,
    api_base: String,
}

impl CoinGeckoClient {
    /// `client` is usually a clone of the one used for reference files;
    /// reqwest clones share the connection pool.
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }
}

#[async_trait]
impl PriceApi for CoinGeckoClient {
    async fn simple_price(&self, ids: &[String]) -> Result<HashMap<String, SimplePrice>, AppError> {
        let url = format!("{}/simple/price", self.api_base);
        debug!("GET {} for {} ids", url, ids.len());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", ids.join(",")),
                ("vs_currencies", VS_CURRENCY.to_string()),
                ("include_market_cap", "true".to_string()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::BatchFetch(e.to_string()))?;

        response
            .json::<HashMap<String, SimplePrice>>()
            .await
            .map_err(|e| AppError::BatchFetch(format!("Invalid price response: {}", e)))
    }

    async fn coin_rank(&self, id: &str) -> Result<Option<u32>, AppError> {
        let url = format!("{}/coins/{}", self.api_base, id);
        let item_err = |message: String| AppError::ItemFetch {
            id: id.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .query(&[
                ("localization", "false"),
                ("tickers", "false"),
                ("market_data", "false"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| item_err(e.to_string()))?;

        let detail: CoinDetail = response
            .json()
            .await
            .map_err(|e| item_err(format!("Invalid coin response: {}", e)))?;

        Ok(rank_from_value(detail.market_cap_rank))
    }
}
