//! Series alignment and the A/B ratio.
//!
//! Two modes:
//! - `Position`: truncate both series to the shorter length and divide
//!   index-for-index. The display window takes the trailing timestamps of
//!   series B and the trailing ratios independently.
//! - `Date` (default): reduce both series to daily means, join on the UTC
//!   calendar day and divide per shared day, so every displayed ratio is
//!   paired with the day it was computed for.

use crate::daily::to_daily;
use crate::data::DataError;
use crate::domain::{PriceSeries, RatioSeries};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    #[default]
    Date,
    Position,
}

impl FromStr for AlignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(AlignMode::Date),
            "position" => Ok(AlignMode::Position),
            other => Err(format!("unknown alignment '{other}' (expected date or position)")),
        }
    }
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignMode::Date => f.write_str("date"),
            AlignMode::Position => f.write_str("position"),
        }
    }
}

/// Full ratio series plus the trailing window chosen for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedRatio {
    pub ratio: RatioSeries,
    /// Timestamps (ms since epoch) for the display window.
    pub display_dates: Vec<i64>,
    pub display_ratios: Vec<f64>,
}

impl AlignedRatio {
    /// `(timestamp_ms, ratio)` pairs of the display window.
    pub fn display_points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.display_dates
            .iter()
            .copied()
            .zip(self.display_ratios.iter().copied())
    }
}

/// The last `n` items, or all of them when there are fewer.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// `a[i] / b[i]` for `i < min(len(a), len(b))`.
pub fn ratio_series(a: &PriceSeries, b: &PriceSeries) -> RatioSeries {
    RatioSeries(a.prices().zip(b.prices()).map(|(pa, pb)| pa / pb).collect())
}

/// Positional alignment.
///
/// The two display slices are cut independently by the same window and are
/// not checked against each other.
pub fn align_and_ratio(a: &PriceSeries, b: &PriceSeries, window: usize) -> AlignedRatio {
    let ratio = ratio_series(a, b);
    let b_dates: Vec<i64> = b.timestamps().collect();

    AlignedRatio {
        display_dates: tail(&b_dates, window).to_vec(),
        display_ratios: tail(ratio.values(), window).to_vec(),
        ratio,
    }
}

/// Calendar-day alignment: inner join of the daily means on date.
pub fn align_by_date(
    a: &PriceSeries,
    b: &PriceSeries,
    window: usize,
) -> Result<AlignedRatio, DataError> {
    let days_a = to_daily(a)?;
    let days_b = to_daily(b)?;
    let by_date: HashMap<_, _> = days_b.iter().map(|d| (d.date, d.price)).collect();

    let (dates, ratios): (Vec<i64>, Vec<f64>) = days_a
        .iter()
        .filter_map(|d| by_date.get(&d.date).map(|pb| (d.timestamp_ms(), d.price / pb)))
        .unzip();

    Ok(AlignedRatio {
        display_dates: tail(&dates, window).to_vec(),
        display_ratios: tail(&ratios, window).to_vec(),
        ratio: RatioSeries(ratios),
    })
}

pub fn align(
    mode: AlignMode,
    a: &PriceSeries,
    b: &PriceSeries,
    window: usize,
) -> Result<AlignedRatio, DataError> {
    match mode {
        AlignMode::Position => Ok(align_and_ratio(a, b, window)),
        AlignMode::Date => align_by_date(a, b, window),
    }
}
