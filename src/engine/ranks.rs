use tracing::{error, info};

use crate::models::price::{RankLookup, RankRecord};
use crate::provider::PriceApi;

/// Look up the market-cap rank of each identifier, one request at a time.
///
/// A failed lookup is logged and recorded as [`RankLookup::Failed`]; the
/// remaining identifiers are still queried. Every successful lookup is echoed
/// to stdout as `id: rank`.
pub async fn lookup_ranks(api: &dyn PriceApi, ids: &[String]) -> Vec<(String, RankLookup)> {
    let mut lookups = Vec::with_capacity(ids.len());

    for id in ids {
        let lookup = match api.coin_rank(id).await {
            Ok(Some(rank)) => {
                println!("{}: {}", id, rank);
                RankLookup::Ranked(rank)
            }
            Ok(None) => {
                println!("{}: None", id);
                RankLookup::Unranked
            }
            Err(e) => {
                error!("Error retrieving data for {}: {}", id, e);
                RankLookup::Failed(e.to_string())
            }
        };
        lookups.push((id.clone(), lookup));
    }

    lookups
}

/// Keep only identifiers that ended up with a rank.
pub fn surviving_ranks(lookups: Vec<(String, RankLookup)>) -> Vec<RankRecord> {
    lookups
        .into_iter()
        .map(|(id, lookup)| lookup.into_record(id))
        .filter(|record| record.market_cap_rank.is_some())
        .collect()
}

/// Ranked identifiers, plus the identifiers whose lookup failed.
/// Failed and unranked lookups are both left out of the records.
pub async fn fetch_ranks(api: &dyn PriceApi, ids: &[String]) -> (Vec<RankRecord>, Vec<String>) {
    let lookups = lookup_ranks(api, ids).await;
    let failed: Vec<String> = lookups
        .iter()
        .filter(|(_, lookup)| lookup.is_failed())
        .map(|(id, _)| id.clone())
        .collect();

    let ranks = surviving_ranks(lookups);
    info!(
        "Ranks available for {} of {} identifiers ({} failed)",
        ranks.len(),
        ids.len(),
        failed.len()
    );
    (ranks, failed)
}
