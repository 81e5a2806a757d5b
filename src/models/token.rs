/// Column names shared by the reference files.
pub const SYMBOL_COL: &str = "symbol";
pub const ID_COL: &str = "id";

/// One tracked token from the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub symbol: String,
}

/// Lowercase ticker to price API identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMapping {
    pub symbol: String,
    pub id: String,
}
