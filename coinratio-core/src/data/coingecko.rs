//! CoinGecko price-index client.
//!
//! Two endpoints are used: `/coins/list` for the asset catalog and
//! `/coins/{id}/market_chart` for price history. Every call goes through the
//! rate limiter and fails fast; there are no retries.
//!
//! The market-chart endpoint returns hourly samples for short spans and
//! roughly daily samples beyond 90 days. Samples are passed through as-is.

use super::provider::{DataError, Endpoint, PriceIndex};
use super::rate_limit::RateLimiter;
use crate::config::{ApiConfig, RateLimitConfig};
use crate::domain::{AssetCatalogEntry, PricePoint, PriceSeries, TimeSpan};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Market-chart response. `market_caps` and `total_volumes` are ignored.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, Option<f64>)>,
}

/// Why a GET did not produce a body.
#[derive(Debug)]
enum FetchFailure {
    RateLimited { retry_after_secs: u64 },
    Unavailable(String),
}

impl FetchFailure {
    fn into_error(self, endpoint: Endpoint) -> DataError {
        match (self, endpoint) {
            (FetchFailure::RateLimited { retry_after_secs }, endpoint) => DataError::RateLimited {
                endpoint,
                retry_after_secs,
            },
            (FetchFailure::Unavailable(reason), Endpoint::Catalog) => {
                DataError::CatalogUnavailable(reason)
            }
            (FetchFailure::Unavailable(reason), Endpoint::History { id }) => {
                DataError::HistoryUnavailable { id, reason }
            }
        }
    }
}

/// Retry-After used when a 429 carries no parseable header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// CoinGecko price-index client.
pub struct CoinGeckoClient {
    client: reqwest::blocking::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl CoinGeckoClient {
    pub fn new(api: &ApiConfig, limits: &RateLimitConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(api.user_agent.as_str())
            .build()
            .map_err(|e| DataError::ClientSetup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::per_minute(
                limits.max_calls_per_minute,
                Duration::from_secs(limits.pause_secs),
            ),
        })
    }

    fn catalog_url(&self) -> String {
        format!("{}/coins/list", self.base_url)
    }

    fn market_chart_url(&self, id: &str, quote: &str, span: TimeSpan) -> String {
        format!(
            "{}/coins/{id}/market_chart?vs_currency={quote}&days={}",
            self.base_url,
            span.query_value()
        )
    }

    /// Parse a `/coins/list` body.
    pub fn parse_catalog(body: &str) -> Result<Vec<AssetCatalogEntry>, DataError> {
        serde_json::from_str(body).map_err(|e| DataError::ResponseFormat {
            endpoint: Endpoint::Catalog,
            reason: e.to_string(),
        })
    }

    /// Parse a `/coins/{id}/market_chart` body. Samples with a null price are dropped.
    pub fn parse_market_chart(id: &str, body: &str) -> Result<PriceSeries, DataError> {
        let resp: MarketChartResponse =
            serde_json::from_str(body).map_err(|e| DataError::ResponseFormat {
                endpoint: Endpoint::History { id: id.to_string() },
                reason: e.to_string(),
            })?;

        let total = resp.prices.len();
        let series: PriceSeries = resp
            .prices
            .into_iter()
            .filter_map(|(ts, price)| price.map(|p| PricePoint::new(ts as i64, p)))
            .collect();

        if series.len() < total {
            debug!(id, dropped = total - series.len(), "dropped samples with null price");
        }
        Ok(series)
    }

    /// GET a URL and return the body.
    fn get_body(&self, url: &str) -> Result<String, FetchFailure> {
        self.limiter.acquire();
        debug!(url, "GET");

        let resp = self.client.get(url).send().map_err(|e| {
            FetchFailure::Unavailable(if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                format!("network unreachable: {e}")
            })
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!(url, retry_after_secs, "rate limited by price index");
            return Err(FetchFailure::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(FetchFailure::Unavailable(format!("HTTP {status}")));
        }

        resp.text()
            .map_err(|e| FetchFailure::Unavailable(format!("failed to read body: {e}")))
    }
}

impl PriceIndex for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_catalog(&self) -> Result<Vec<AssetCatalogEntry>, DataError> {
        let body = self
            .get_body(&self.catalog_url())
            .map_err(|f| f.into_error(Endpoint::Catalog))?;
        let catalog = Self::parse_catalog(&body)?;
        info!(entries = catalog.len(), "fetched asset catalog");
        Ok(catalog)
    }

    fn fetch_history(
        &self,
        id: &str,
        quote: &str,
        span: TimeSpan,
    ) -> Result<PriceSeries, DataError> {
        let body = self
            .get_body(&self.market_chart_url(id, quote, span))
            .map_err(|f| f.into_error(Endpoint::History { id: id.to_string() }))?;
        let series = Self::parse_market_chart(id, &body)?;
        info!(id, quote, %span, points = series.len(), "fetched price history");
        Ok(series)
    }
}
