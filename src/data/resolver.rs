use polars::prelude::*;
use tracing::info;

use crate::errors::AppError;
use crate::models::token::{ID_COL, SYMBOL_COL};

/// Scratch column used to restore left-side order after a join.
pub(crate) const ROW_IDX: &str = "__row";

/// Resolve the token list to price API identifiers.
///
/// Token symbols are lowercased, then inner-joined to the mapping on `symbol`.
/// Ids come back in token-list order; a token matching several mapping rows
/// yields several ids. Unmatched tokens are dropped without error.
pub fn resolve_identifiers(tokens: &DataFrame, mapping: &DataFrame) -> Result<Vec<String>, AppError> {
    let left = tokens
        .clone()
        .lazy()
        .select([col(SYMBOL_COL)
            .cast(DataType::String)
            .str()
            .to_lowercase()
            .alias(SYMBOL_COL)])
        .with_row_index(ROW_IDX, None);

    let joined = left
        .join(
            mapping_keys(mapping),
            [col(SYMBOL_COL)],
            [col(SYMBOL_COL)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([ROW_IDX], SortMultipleOptions::default().with_maintain_order(true))
        .select([col(ID_COL)])
        .collect()?;

    let ids = string_column(&joined, ID_COL)?;
    info!("Resolved {} identifiers from {} tokens", ids.len(), tokens.height());
    Ok(ids)
}

/// `symbol` and `id` of the mapping as strings, nothing else.
pub(crate) fn mapping_keys(mapping: &DataFrame) -> LazyFrame {
    mapping.clone().lazy().select([
        col(SYMBOL_COL).cast(DataType::String),
        col(ID_COL).cast(DataType::String),
    ])
}

pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>, AppError> {
    let values = df.column(name)?.as_materialized_series().str()?;
    Ok(values.into_iter().flatten().map(str::to_owned).collect())
}
