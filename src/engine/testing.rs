//! In-memory [`PriceApi`] for engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::provider::{PriceApi, SimplePrice};

#[derive(Default)]
pub struct FakeApi {
    prices: HashMap<String, SimplePrice>,
    ranks: HashMap<String, u32>,
    fail_prices: bool,
    failing_ranks: HashSet<String>,
    price_calls: AtomicUsize,
    rank_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, id: &str, usd: f64, usd_market_cap: f64) -> Self {
        self.with_quote(
            id,
            SimplePrice {
                usd: Some(usd),
                usd_market_cap: Some(usd_market_cap),
            },
        )
    }

    /// Raw quote, for responses with missing fields.
    pub fn with_quote(mut self, id: &str, quote: SimplePrice) -> Self {
        self.prices.insert(id.to_string(), quote);
        self
    }

    pub fn with_rank(mut self, id: &str, rank: u32) -> Self {
        self.ranks.insert(id.to_string(), rank);
        self
    }

    pub fn failing_prices(mut self) -> Self {
        self.fail_prices = true;
        self
    }

    pub fn failing_rank(mut self, id: &str) -> Self {
        self.failing_ranks.insert(id.to_string());
        self
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::Relaxed)
    }

    pub fn rank_calls(&self) -> usize {
        self.rank_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PriceApi for FakeApi {
    async fn simple_price(&self, ids: &[String]) -> Result<HashMap<String, SimplePrice>, AppError> {
        self.price_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_prices {
            return Err(AppError::BatchFetch("connection reset".to_string()));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.prices.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }

    async fn coin_rank(&self, id: &str) -> Result<Option<u32>, AppError> {
        self.rank_calls.fetch_add(1, Ordering::Relaxed);
        if self.failing_ranks.contains(id) {
            return Err(AppError::ItemFetch {
                id: id.to_string(),
                message: "429 Too Many Requests".to_string(),
            });
        }
        Ok(self.ranks.get(id).copied())
    }
}
