//! coinratio core: resolve tickers against a price index, fetch two price
//! histories and compute their ratio.
//!
//! - Domain types (catalog entries, price points and series, ratio series)
//! - Symbol resolution with the shortest-identifier collision rule
//! - Positional and calendar-day alignment of two series
//! - Daily aggregation of intraday samples
//! - CoinGecko client behind the `PriceIndex` trait, with rate limiting
//! - TOML configuration

pub mod align;
pub mod config;
pub mod daily;
pub mod data;
pub mod domain;
pub mod pipeline;
pub mod resolver;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use align::{align, align_and_ratio, align_by_date, AlignMode, AlignedRatio};
pub use config::{Config, ConfigError};
pub use data::{CoinGeckoClient, DataError, Endpoint, PriceIndex};
pub use domain::{AssetCatalogEntry, FetchSpan, PricePoint, PriceSeries, RatioSeries, TimeSpan};
pub use pipeline::{run_pair, AssetHistory, PairReport, PairRequest};
pub use resolver::{SymbolMap, SymbolResolver};
