//! Price-index access: provider trait, CoinGecko client, rate limiting.

pub mod coingecko;
pub mod provider;
pub mod rate_limit;

pub use coingecko::CoinGeckoClient;
pub use provider::{DataError, Endpoint, PriceIndex};
pub use rate_limit::RateLimiter;
