//! Price-index trait and structured error types.
//!
//! The PriceIndex trait abstracts over the price source so the resolver and
//! the pair pipeline can be driven by a fake in tests.

use crate::domain::{AssetCatalogEntry, PriceSeries, TimeSpan};
use std::fmt;
use thiserror::Error;

/// Which outbound call a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Catalog,
    History { id: String },
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Catalog => f.write_str("asset catalog"),
            Endpoint::History { id } => write!(f, "price history of '{id}'"),
        }
    }
}

/// Structured error types for data operations.
///
/// Each outbound call fails with its own kind so the CLI can tell a dead
/// catalog from a missing asset history from a typo in a ticker.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("asset catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("price history unavailable for '{id}': {reason}")]
    HistoryUnavailable { id: String, reason: String },

    /// HTTP 429. `retry_after_secs` comes from the `Retry-After` header.
    #[error("rate limited fetching {endpoint}: retry after {retry_after_secs}s")]
    RateLimited {
        endpoint: Endpoint,
        retry_after_secs: u64,
    },

    #[error("malformed response from {endpoint}: {reason}")]
    ResponseFormat { endpoint: Endpoint, reason: String },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// A source of asset catalogs and historical prices.
pub trait PriceIndex {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the full catalog of known assets.
    fn fetch_catalog(&self) -> Result<Vec<AssetCatalogEntry>, DataError>;

    /// Fetch the price history of one asset, quoted in `quote`, over `span`.
    fn fetch_history(
        &self,
        id: &str,
        quote: &str,
        span: TimeSpan,
    ) -> Result<PriceSeries, DataError>;
}
