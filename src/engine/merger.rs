use polars::prelude::*;
use tracing::info;

use crate::data::resolver::{mapping_keys, ROW_IDX};
use crate::errors::AppError;
use crate::models::output::OutputRow;
use crate::models::price::{PriceRecord, RankRecord};
use crate::models::token::{ID_COL, SYMBOL_COL};

pub const USD_COL: &str = "usd";
pub const MCAP_COL: &str = "usd_market_cap";
pub const RANK_COL: &str = "market_cap_rank";

pub fn prices_frame(prices: &[PriceRecord]) -> Result<DataFrame, AppError> {
    let ids: Vec<&str> = prices.iter().map(|p| p.id.as_str()).collect();
    let usd: Vec<Option<f64>> = prices.iter().map(|p| p.usd).collect();
    let mcap: Vec<f64> = prices.iter().map(|p| p.usd_market_cap).collect();
    Ok(df!(ID_COL => ids, USD_COL => usd, MCAP_COL => mcap)?)
}

/// Rank frame. Records without a rank are left out.
pub fn ranks_frame(ranks: &[RankRecord]) -> Result<DataFrame, AppError> {
    let (ids, values): (Vec<&str>, Vec<u32>) = ranks
        .iter()
        .filter_map(|r| r.market_cap_rank.map(|rank| (r.id.as_str(), rank)))
        .unzip();
    Ok(df!(ID_COL => ids, RANK_COL => values)?)
}

/// Join prices back to symbols (and ranks, when given), uppercase the
/// symbol and keep rows with a strictly positive market cap.
///
/// Output follows price record order. An identifier mapped from several
/// symbols produces one row per symbol.
pub fn merge_and_filter(
    prices: &[PriceRecord],
    mapping: &DataFrame,
    ranks: Option<&[RankRecord]>,
) -> Result<Vec<OutputRow>, AppError> {
    let mut lf = prices_frame(prices)?
        .lazy()
        .with_row_index(ROW_IDX, None)
        .join(
            mapping_keys(mapping),
            [col(ID_COL)],
            [col(ID_COL)],
            JoinArgs::new(JoinType::Inner),
        );

    let mut columns = vec![
        col(SYMBOL_COL).str().to_uppercase().alias(SYMBOL_COL),
        col(USD_COL),
        col(MCAP_COL),
    ];

    if let Some(ranks) = ranks {
        lf = lf.join(
            ranks_frame(ranks)?.lazy(),
            [col(ID_COL)],
            [col(ID_COL)],
            JoinArgs::new(JoinType::Inner),
        );
        columns.push(col(RANK_COL));
    }

    let df = lf
        .filter(col(MCAP_COL).gt(lit(0.0)))
        .sort([ROW_IDX], SortMultipleOptions::default().with_maintain_order(true))
        .select(columns)
        .collect()?;

    let rows = rows_from_frame(&df, ranks.is_some())?;
    info!("{} of {} priced identifiers survived merge and filter", rows.len(), prices.len());
    Ok(rows)
}

fn rows_from_frame(df: &DataFrame, ranked: bool) -> Result<Vec<OutputRow>, AppError> {
    let symbols = df.column(SYMBOL_COL)?.as_materialized_series().str()?;
    let usd = df.column(USD_COL)?.as_materialized_series().f64()?;
    let mcap = df.column(MCAP_COL)?.as_materialized_series().f64()?;
    let ranks = if ranked {
        Some(df.column(RANK_COL)?.as_materialized_series().u32()?)
    } else {
        None
    };

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(symbol), Some(usd_market_cap)) = (symbols.get(i), mcap.get(i)) else {
            continue;
        };
        let market_cap_rank = match ranks {
            Some(ranks) => match ranks.get(i) {
                Some(rank) => Some(rank),
                None => continue,
            },
            None => None,
        };
        rows.push(OutputRow {
            symbol: symbol.to_string(),
            usd: usd.get(i),
            usd_market_cap,
            market_cap_rank,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::mapping;

    fn price(id: &str, usd: f64, mcap: f64) -> PriceRecord {
        PriceRecord {
            id: id.to_string(),
            usd: Some(usd),
            usd_market_cap: mcap,
        }
    }

    fn rank(id: &str, rank: Option<u32>) -> RankRecord {
        RankRecord {
            id: id.to_string(),
            market_cap_rank: rank,
        }
    }

    #[test]
    fn test_basic_merge_uppercases_and_keeps_order() {
        let prices = vec![price("ethereum", 3000.0, 3.6e11), price("abc-token", 1.5, 1e6)];
        let m = mapping(&[("abc", "abc-token"), ("eth", "ethereum")]);

        let rows = merge_and_filter(&prices, &m, None).unwrap();
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ETH", "ABC"]);
        assert!(rows.iter().all(|r| r.market_cap_rank.is_none()));
    }

    #[test]
    fn test_non_positive_market_cap_filtered() {
        let prices = vec![
            price("a", 1.0, 0.0),
            price("b", 1.0, -5.0),
            price("c", 1.0, 0.01),
        ];
        let m = mapping(&[("a", "a"), ("b", "b"), ("c", "c")]);

        let rows = merge_and_filter(&prices, &m, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "C");
        assert!(rows.iter().all(|r| r.usd_market_cap > 0.0));
    }

    #[test]
    fn test_unmapped_identifier_dropped() {
        let prices = vec![price("orphan", 1.0, 10.0)];
        let m = mapping(&[("abc", "abc-token")]);
        assert!(merge_and_filter(&prices, &m, None).unwrap().is_empty());
    }

    #[test]
    fn test_ranked_merge_drops_missing_and_null_ranks() {
        let prices = vec![
            price("a", 1.0, 10.0),
            price("b", 2.0, 20.0),
            price("c", 3.0, 30.0),
        ];
        let m = mapping(&[("a", "a"), ("b", "b"), ("c", "c")]);
        let ranks = vec![rank("a", Some(5)), rank("b", None)];

        let rows = merge_and_filter(&prices, &m, Some(ranks.as_slice())).unwrap();
        assert_eq!(
            rows,
            vec![OutputRow {
                symbol: "A".to_string(),
                usd: Some(1.0),
                usd_market_cap: 10.0,
                market_cap_rank: Some(5),
            }]
        );
    }

    #[test]
    fn test_shared_identifier_yields_row_per_symbol() {
        let prices = vec![price("weth", 3000.0, 1e9)];
        let m = mapping(&[("weth", "weth"), ("eth2", "weth")]);

        let mut symbols: Vec<String> = merge_and_filter(&prices, &m, None)
            .unwrap()
            .into_iter()
            .map(|r| r.symbol)
            .collect();
        symbols.sort();
        assert_eq!(symbols, vec!["ETH2", "WETH"]);
    }

    #[test]
    fn test_missing_price_survives_merge() {
        let prices = vec![PriceRecord {
            id: "no-price".to_string(),
            usd: None,
            usd_market_cap: 5e6,
        }];
        let m = mapping(&[("np", "no-price")]);

        let rows = merge_and_filter(&prices, &m, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "NP");
        assert_eq!(rows[0].usd, None);
    }

    #[test]
    fn test_empty_prices() {
        let m = mapping(&[("abc", "abc-token")]);
        let no_ranks: Vec<RankRecord> = Vec::new();
        assert!(merge_and_filter(&[], &m, Some(no_ranks.as_slice()))
            .unwrap()
            .is_empty());
    }
}
