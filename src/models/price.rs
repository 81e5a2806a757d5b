/// Current price and market cap for one identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub id: String,
    pub usd: Option<f64>,
    pub usd_market_cap: f64,
}

/// Market-cap rank for one identifier. `None` when the lookup failed or no rank was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRecord {
    pub id: String,
    pub market_cap_rank: Option<u32>,
}

/// Outcome of the single batched price request.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceBatch {
    Fetched(Vec<PriceRecord>),
    /// The whole batch failed. Downstream sees an empty record set.
    Failed(String),
}

impl PriceBatch {
    pub fn records(&self) -> &[PriceRecord] {
        match self {
            PriceBatch::Fetched(records) => records,
            PriceBatch::Failed(_) => &[],
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            PriceBatch::Fetched(_) => None,
            PriceBatch::Failed(reason) => Some(reason),
        }
    }

    /// Identifiers that came back with a price, in record order.
    pub fn ids(&self) -> Vec<String> {
        self.records().iter().map(|r| r.id.clone()).collect()
    }
}

/// Outcome of one per-identifier rank lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankLookup {
    Ranked(u32),
    /// The call succeeded but the coin has no rank.
    Unranked,
    Failed(String),
}

impl RankLookup {
    pub fn rank(&self) -> Option<u32> {
        match self {
            RankLookup::Ranked(rank) => Some(*rank),
            RankLookup::Unranked | RankLookup::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RankLookup::Failed(_))
    }

    pub fn into_record(self, id: String) -> RankRecord {
        RankRecord {
            id,
            market_cap_rank: self.rank(),
        }
    }
}
