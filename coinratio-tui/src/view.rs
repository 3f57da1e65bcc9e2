//! What gets drawn: three chart specs plus a legend, built from a pair report.
//!
//! X values are seconds since the epoch so axis labels can be rendered as
//! calendar dates. Non-finite values (a ratio over a zero price) are kept in
//! the `ChartSpec` but never plotted or used for bounds.

use chrono::DateTime;
use coinratio_core::{PairReport, PriceSeries};

use crate::theme::ChartSlot;

const DAY_SECS: f64 = 86_400.0;

/// One line chart: title, axis labels and `(ts_secs, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub slot: ChartSlot,
    pub points: Vec<(f64, f64)>,
}

/// Axis bounds with padding applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartSpec {
    /// `Historical BTC (bitcoin) (USD)` over the full fetched series.
    pub fn price(symbol: &str, id: &str, quote: &str, series: &PriceSeries, slot: ChartSlot) -> Self {
        let quote = quote.to_uppercase();
        Self {
            title: format!("Historical {symbol} ({id}) ({quote})"),
            x_label: "Date".into(),
            y_label: format!("Price ({quote})"),
            slot,
            points: series
                .points
                .iter()
                .map(|p| (ms_to_secs(p.timestamp_ms), p.price))
                .collect(),
        }
    }

    /// `Historical BTC/ETH` over the display window.
    pub fn ratio<I>(first: &str, second: &str, points: I) -> Self
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        Self {
            title: format!("Historical {first}/{second}"),
            x_label: "Date".into(),
            y_label: "Ratio".into(),
            slot: ChartSlot::Ratio,
            points: points
                .into_iter()
                .map(|(ts, v)| (ms_to_secs(ts), v))
                .collect(),
        }
    }

    /// Points with both coordinates finite.
    pub fn plottable(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }

    /// Padded bounds, `None` when nothing is plottable.
    pub fn bounds(&self) -> Option<Bounds> {
        let pts = self.plottable();
        if pts.is_empty() {
            return None;
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &pts {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if x_max - x_min <= 0.0 {
            x_min -= DAY_SECS;
            x_max += DAY_SECS;
        }

        // Pad Y by 5% of range; a flat line gets 5% of its level (or 1.0 at zero).
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 {
            y_range * 0.05
        } else if y_max != 0.0 {
            y_max.abs() * 0.05
        } else {
            1.0
        };

        Some(Bounds {
            x: [x_min, x_max],
            y: [y_min - y_pad, y_max + y_pad],
        })
    }
}

/// Everything the viewer shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioView {
    pub first: ChartSpec,
    pub second: ChartSpec,
    pub ratio: ChartSpec,
    /// `(label, value)` rows for the legend pane.
    pub legend: Vec<(String, String)>,
}

impl RatioView {
    pub fn from_report(report: &PairReport, quote: &str) -> Self {
        let first = ChartSpec::price(
            &report.first.symbol,
            &report.first.id,
            quote,
            &report.first.series,
            ChartSlot::First,
        );
        let second = ChartSpec::price(
            &report.second.symbol,
            &report.second.id,
            quote,
            &report.second.series,
            ChartSlot::Second,
        );
        let ratio = ChartSpec::ratio(
            &report.first.symbol,
            &report.second.symbol,
            report.aligned.display_points(),
        );

        let last_ratio = report
            .aligned
            .display_ratios
            .last()
            .map(|r| format!("{r:.6}"))
            .unwrap_or_else(|| "n/a".into());

        let legend = vec![
            ("Pair".to_string(), report.ratio_label()),
            (
                "Ids".to_string(),
                format!("{} / {}", report.first.id, report.second.id),
            ),
            ("Span".to_string(), report.span.to_string()),
            ("Align".to_string(), report.align.to_string()),
            (
                "Samples".to_string(),
                format!(
                    "{} / {}",
                    report.first.series.len(),
                    report.second.series.len()
                ),
            ),
            (
                "Ratios".to_string(),
                format!(
                    "{} shown of {}",
                    report.aligned.display_ratios.len(),
                    report.aligned.ratio.len()
                ),
            ),
            ("Last ratio".to_string(), last_ratio),
        ];

        Self {
            first,
            second,
            ratio,
            legend,
        }
    }
}

pub fn ms_to_secs(ts_ms: i64) -> f64 {
    ts_ms as f64 / 1000.0
}

/// `YYYY-MM-DD` for an x-axis value in seconds.
pub fn format_date(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Compact y-axis label: more decimals for small magnitudes.
pub fn format_value(v: f64) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        format!("{v:.0}")
    } else if a >= 1.0 {
        format!("{v:.2}")
    } else {
        format!("{v:.6}")
    }
}
