//! Domain types: catalog entries, price points, price and ratio series.
//!
//! Everything here is created fresh per invocation and dropped at exit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the price-index asset catalog, taken verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalogEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl AssetCatalogEntry {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// A single quoted price at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Price in the quote currency (USD unless configured otherwise).
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }

    /// UTC date/time of this sample, `None` if the timestamp is out of range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// UTC calendar day of this sample.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date_naive())
    }
}

/// Price samples in the order the source delivered them (ascending time).
///
/// No gap-filling or interpolation is ever applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Build from the `[[timestampMs, price], ...]` shape used by the price index.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Self {
        pairs
            .iter()
            .map(|&[ts, price]| PricePoint::new(ts as i64, price))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.iter().map(|p| p.timestamp_ms)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = PricePoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Elementwise `a / b` over the aligned prefix (or shared days) of two series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioSeries(pub Vec<f64>);

impl RatioSeries {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How much history to request from the price index.
///
/// Renders as `"<days>days"` for display; the query string carries the bare
/// number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    pub days: u32,
}

impl TimeSpan {
    pub const YEAR: TimeSpan = TimeSpan { days: 365 };

    pub fn days(days: u32) -> Self {
        Self { days }
    }

    pub fn query_value(&self) -> String {
        self.days.to_string()
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}days", self.days)
    }
}

/// Which span to fetch relative to the requested display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSpan {
    /// Fetch exactly the number of days being displayed.
    #[default]
    Window,
    /// Always fetch a full year and display the trailing window.
    Year,
}

impl FetchSpan {
    pub fn time_span(self, window_days: u32) -> TimeSpan {
        match self {
            FetchSpan::Window => TimeSpan::days(window_days),
            FetchSpan::Year => TimeSpan::YEAR,
        }
    }
}

impl FromStr for FetchSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "window" => Ok(FetchSpan::Window),
            "year" => Ok(FetchSpan::Year),
            other => Err(format!("unknown span '{other}' (expected window or year)")),
        }
    }
}

impl fmt::Display for FetchSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchSpan::Window => f.write_str("window"),
            FetchSpan::Year => f.write_str("year"),
        }
    }
}
