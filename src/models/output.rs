/// A row of the snapshot file. `market_cap_rank` is only written by the ranked variant.
/// `usd` is empty in the file when the API reported a market cap but no price.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub symbol: String,
    pub usd: Option<f64>,
    pub usd_market_cap: f64,
    pub market_cap_rank: Option<u32>,
}
