use std::collections::{HashMap, HashSet};

use tracing::{error, info, warn};

use crate::models::price::{PriceBatch, PriceRecord};
use crate::provider::{PriceApi, SimplePrice};

/// Fetch price and market cap for all identifiers in one request.
///
/// Never fails: a failed batch is logged and comes back as
/// [`PriceBatch::Failed`], which downstream treats as "no prices".
pub async fn fetch_prices(api: &dyn PriceApi, ids: &[String]) -> PriceBatch {
    if ids.is_empty() {
        warn!("No identifiers resolved, skipping price request");
        return PriceBatch::Fetched(Vec::new());
    }

    match api.simple_price(ids).await {
        Ok(quotes) => {
            let records = records_from_quotes(ids, &quotes);
            info!("Fetched prices for {} of {} identifiers", records.len(), ids.len());
            PriceBatch::Fetched(records)
        }
        Err(e) => {
            error!("An error occurred while fetching prices: {}", e);
            PriceBatch::Failed(e.to_string())
        }
    }
}

/// One record per distinct requested identifier present in the response, in request order.
///
/// A quote without a market cap can never pass the market-cap filter and is
/// skipped. A quote without a price is kept with an empty `usd`.
pub fn records_from_quotes(ids: &[String], quotes: &HashMap<String, SimplePrice>) -> Vec<PriceRecord> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| {
            let quote = quotes.get(id)?;
            let Some(usd_market_cap) = quote.usd_market_cap else {
                warn!("No market cap for {}, skipping", id);
                return None;
            };
            if quote.usd.is_none() {
                warn!("No usd price for {}", id);
            }
            Some(PriceRecord {
                id: id.clone(),
                usd: quote.usd,
                usd_market_cap,
            })
        })
        .collect()
}
