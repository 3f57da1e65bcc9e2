//! One run: resolve both tickers, fetch both histories, align.
//!
//! All calls are strictly sequential: catalog, then coin A, then coin B.
//! The first failure ends the run.

use crate::align::{align, AlignMode, AlignedRatio};
use crate::data::{DataError, PriceIndex};
use crate::domain::{FetchSpan, PriceSeries, TimeSpan};
use crate::resolver::SymbolResolver;
use tracing::{debug, info, Level};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRequest {
    pub first: String,
    pub second: String,
    /// Display window in days (samples, under positional alignment).
    pub days: u32,
    pub quote: String,
    pub span: FetchSpan,
    pub align: AlignMode,
}

/// A resolved asset and its fetched history.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetHistory {
    /// Ticker as given on the command line.
    pub symbol: String,
    /// Price-index identifier.
    pub id: String,
    pub series: PriceSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub first: AssetHistory,
    pub second: AssetHistory,
    pub span: TimeSpan,
    pub align: AlignMode,
    pub aligned: AlignedRatio,
}

impl PairReport {
    pub fn ratio_label(&self) -> String {
        format!("{}/{}", self.first.symbol, self.second.symbol)
    }
}

pub fn run_pair(index: &dyn PriceIndex, req: &PairRequest) -> Result<PairReport, DataError> {
    let resolver = SymbolResolver::new(index);
    let first_id = resolver.resolve_one(&req.first)?;
    let second_id = resolver.resolve_one(&req.second)?;
    let span = req.span.time_span(req.days);

    debug!(
        first = %req.first,
        second = %req.second,
        days = req.days,
        first_id = %first_id,
        second_id = %second_id,
        %span,
        "resolved pair"
    );

    let first_series = index.fetch_history(&first_id, &req.quote, span)?;
    let second_series = index.fetch_history(&second_id, &req.quote, span)?;
    log_series(&first_id, &first_series);
    log_series(&second_id, &second_series);

    let aligned = align(req.align, &first_series, &second_series, req.days as usize)?;
    info!(
        pair = %format!("{}/{}", req.first, req.second),
        align = %req.align,
        ratios = aligned.ratio.len(),
        displayed = aligned.display_ratios.len(),
        "aligned series"
    );

    Ok(PairReport {
        first: AssetHistory {
            symbol: req.first.clone(),
            id: first_id,
            series: first_series,
        },
        second: AssetHistory {
            symbol: req.second.clone(),
            id: second_id,
            series: second_series,
        },
        span,
        align: req.align,
        aligned,
    })
}

fn log_series(id: &str, series: &PriceSeries) {
    let first = series.first().and_then(|p| p.datetime());
    let last = series.last().and_then(|p| p.datetime());
    debug!(
        id,
        points = series.len(),
        first = ?first,
        last = ?last,
        "price history"
    );

    if tracing::enabled!(Level::DEBUG) {
        debug!(id, samples = ?raw_samples(series), "raw price samples");
    }
}

/// `(RFC 3339 time, price)` for every sample, as delivered.
fn raw_samples(series: &PriceSeries) -> Vec<(String, f64)> {
    series
        .points
        .iter()
        .map(|p| {
            let at = p
                .datetime()
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| p.timestamp_ms.to_string());
            (at, p.price)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetCatalogEntry, PricePoint};
    use std::cell::RefCell;

    const DAY_MS: i64 = 86_400_000;
    const JAN_1: i64 = 1_704_067_200_000;

    /// In-memory price index that records every call.
    struct FakeIndex {
        catalog: Result<Vec<AssetCatalogEntry>, String>,
        histories: Vec<(String, Vec<f64>)>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeIndex {
        fn new() -> Self {
            Self {
                catalog: Ok(vec![
                    AssetCatalogEntry::new("bitcoin", "btc", "Bitcoin"),
                    AssetCatalogEntry::new("bitcoin-cash", "btc", "Bitcoin Cash"),
                    AssetCatalogEntry::new("ethereum", "eth", "Ethereum"),
                    AssetCatalogEntry::new("flow", "flow", "Flow"),
                ]),
                histories: vec![
                    ("bitcoin".into(), vec![40.0, 42.0, 44.0, 46.0]),
                    ("ethereum".into(), vec![2.0, 2.0, 4.0, 4.0]),
                ],
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PriceIndex for FakeIndex {
        fn name(&self) -> &str {
            "fake"
        }

        fn fetch_catalog(&self) -> Result<Vec<AssetCatalogEntry>, DataError> {
            self.calls.borrow_mut().push("catalog".into());
            self.catalog.clone().map_err(DataError::CatalogUnavailable)
        }

        fn fetch_history(
            &self,
            id: &str,
            quote: &str,
            span: TimeSpan,
        ) -> Result<PriceSeries, DataError> {
            self.calls.borrow_mut().push(format!("{id}:{quote}:{span}"));
            self.histories
                .iter()
                .find(|(hid, _)| hid == id)
                .map(|(_, prices)| {
                    prices
                        .iter()
                        .enumerate()
                        .map(|(i, &p)| PricePoint::new(JAN_1 + i as i64 * DAY_MS, p))
                        .collect()
                })
                .ok_or_else(|| DataError::HistoryUnavailable {
                    id: id.to_string(),
                    reason: "HTTP 404 Not Found".into(),
                })
        }
    }

    fn request(first: &str, second: &str) -> PairRequest {
        PairRequest {
            first: first.into(),
            second: second.into(),
            days: 90,
            quote: "usd".into(),
            span: FetchSpan::Window,
            align: AlignMode::Date,
        }
    }

    #[test]
    fn calls_are_sequential_catalog_then_a_then_b() {
        let index = FakeIndex::new();
        let report = run_pair(&index, &request("BTC", "ETH")).unwrap();
        assert_eq!(
            *index.calls.borrow(),
            vec![
                "catalog".to_string(),
                "bitcoin:usd:90days".to_string(),
                "ethereum:usd:90days".to_string()
            ]
        );
        assert_eq!(report.first.id, "bitcoin");
        assert_eq!(report.second.id, "ethereum");
        assert_eq!(report.aligned.ratio.0, vec![20.0, 21.0, 11.0, 11.5]);
        assert_eq!(report.ratio_label(), "BTC/ETH");
    }

    #[test]
    fn year_span_fetches_365_days() {
        let index = FakeIndex::new();
        let mut req = request("btc", "eth");
        req.span = FetchSpan::Year;
        req.days = 2;
        let report = run_pair(&index, &req).unwrap();
        assert_eq!(report.span, TimeSpan::YEAR);
        assert_eq!(report.aligned.display_ratios, vec![11.0, 11.5]);
    }

    #[test]
    fn unknown_symbol_stops_before_any_history_fetch() {
        let index = FakeIndex::new();
        let err = run_pair(&index, &request("BTC", "xyz123")).unwrap_err();
        assert!(matches!(err, DataError::UnknownSymbol { ref symbol } if symbol == "xyz123"));
        assert_eq!(*index.calls.borrow(), vec!["catalog".to_string()]);
    }

    #[test]
    fn catalog_failure_is_reported_as_such() {
        let mut index = FakeIndex::new();
        index.catalog = Err("HTTP 503 Service Unavailable".into());
        let err = run_pair(&index, &request("BTC", "ETH")).unwrap_err();
        assert!(matches!(err, DataError::CatalogUnavailable(_)));
    }

    #[test]
    fn missing_history_is_reported_for_that_asset() {
        let index = FakeIndex::new();
        let err = run_pair(&index, &request("BTC", "FLOW")).unwrap_err();
        match err {
            DataError::HistoryUnavailable { id, .. } => assert_eq!(id, "flow"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn raw_samples_pair_each_time_with_its_price() {
        let series: PriceSeries = vec![
            PricePoint::new(JAN_1, 42000.5),
            PricePoint::new(JAN_1 + DAY_MS, 43000.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            raw_samples(&series),
            vec![
                ("2024-01-01T00:00:00+00:00".to_string(), 42000.5),
                ("2024-01-02T00:00:00+00:00".to_string(), 43000.0),
            ]
        );
    }
}
