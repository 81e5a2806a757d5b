//! Reference frames built from typed records, for tests.

use polars::prelude::*;

use crate::models::token::{IdentifierMapping, TokenRecord, ID_COL, SYMBOL_COL};

pub fn tokens_frame(tokens: &[TokenRecord]) -> DataFrame {
    let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol.as_str()).collect();
    df!(SYMBOL_COL => symbols).unwrap()
}

pub fn mapping_frame(mapping: &[IdentifierMapping]) -> DataFrame {
    let symbols: Vec<&str> = mapping.iter().map(|m| m.symbol.as_str()).collect();
    let ids: Vec<&str> = mapping.iter().map(|m| m.id.as_str()).collect();
    df!(SYMBOL_COL => symbols, ID_COL => ids).unwrap()
}

/// Token list with one row per symbol.
pub fn tokens(symbols: &[&str]) -> DataFrame {
    let records: Vec<TokenRecord> = symbols
        .iter()
        .map(|s| TokenRecord { symbol: s.to_string() })
        .collect();
    tokens_frame(&records)
}

/// Mapping from `(symbol, id)` pairs.
pub fn mapping(pairs: &[(&str, &str)]) -> DataFrame {
    let records: Vec<IdentifierMapping> = pairs
        .iter()
        .map(|(s, id)| IdentifierMapping {
            symbol: s.to_string(),
            id: id.to_string(),
        })
        .collect();
    mapping_frame(&records)
}
