//! Reduce intraday samples to one price per UTC calendar day.
//!
//! Days with several samples use their mean. Samples must arrive in
//! ascending order. Days without samples are left as gaps and never filled.

use crate::data::DataError;
use crate::domain::PriceSeries;
use chrono::NaiveDate;

/// Mean price of one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub price: f64,
    /// Number of samples averaged into `price`.
    pub samples: usize,
}

impl DailyPrice {
    /// Midnight UTC of `date`, in milliseconds since the epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

/// Aggregate a series into daily means.
pub fn to_daily(series: &PriceSeries) -> Result<Vec<DailyPrice>, DataError> {
    let mut days: Vec<DailyPrice> = Vec::new();
    let mut current: Option<(NaiveDate, f64, usize)> = None;

    for point in &series.points {
        let date = point.date().ok_or_else(|| {
            DataError::Validation(format!("invalid timestamp: {}", point.timestamp_ms))
        })?;

        current = match current {
            None => Some((date, point.price, 1)),
            Some((day, total, count)) if day == date => Some((day, total + point.price, count + 1)),
            Some((day, _, _)) if date < day => {
                return Err(DataError::Validation(format!(
                    "duplicate day {date}: samples are not in ascending order"
                )));
            }
            Some((day, total, count)) => {
                days.push(DailyPrice {
                    date: day,
                    price: total / count as f64,
                    samples: count,
                });
                Some((date, point.price, 1))
            }
        };
    }

    if let Some((day, total, count)) = current {
        days.push(DailyPrice {
            date: day,
            price: total / count as f64,
            samples: count,
        });
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;

    const HOUR_MS: i64 = 3_600_000;
    const DAY_MS: i64 = 24 * HOUR_MS;
    // 2024-01-01T00:00:00Z
    const JAN_1: i64 = 1_704_067_200_000;

    fn series(points: &[(i64, f64)]) -> PriceSeries {
        points
            .iter()
            .map(|&(ts, p)| PricePoint::new(ts, p))
            .collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hourly_samples_average_per_day() {
        let s = series(&[
            (JAN_1, 10.0),
            (JAN_1 + HOUR_MS, 20.0),
            (JAN_1 + 2 * HOUR_MS, 30.0),
            (JAN_1 + DAY_MS, 40.0),
        ]);
        let days = to_daily(&s).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, ymd(2024, 1, 1));
        assert_eq!(days[0].price, 20.0);
        assert_eq!(days[0].samples, 3);
        assert_eq!(days[1].date, ymd(2024, 1, 2));
        assert_eq!(days[1].price, 40.0);
    }

    #[test]
    fn one_skipped_day_is_left_as_gap() {
        let s = series(&[(JAN_1, 1.0), (JAN_1 + 2 * DAY_MS, 3.0)]);
        let days = to_daily(&s).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, ymd(2024, 1, 3));
    }

    #[test]
    fn multi_day_gap_is_left_unfilled() {
        let s = series(&[(JAN_1, 1.0), (JAN_1 + 3 * DAY_MS, 3.0), (JAN_1 + 30 * DAY_MS, 5.0)]);
        let days = to_daily(&s).unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 1), ymd(2024, 1, 4), ymd(2024, 1, 31)]);
    }

    #[test]
    fn year_wrap_is_a_normal_step() {
        // 2023-12-31T23:59:00Z then 2024-01-01T00:02:00Z
        let s = series(&[(JAN_1 - 60_000, 1.0), (JAN_1 + 120_000, 2.0)]);
        let days = to_daily(&s).unwrap();
        assert_eq!(days[0].date, ymd(2023, 12, 31));
        assert_eq!(days[1].date, ymd(2024, 1, 1));
    }

    #[test]
    fn day_reappearing_is_rejected() {
        let s = series(&[(JAN_1, 1.0), (JAN_1 + DAY_MS, 2.0), (JAN_1 + HOUR_MS, 3.0)]);
        assert!(matches!(to_daily(&s), Err(DataError::Validation(_))));
    }

    #[test]
    fn empty_series_has_no_days() {
        assert!(to_daily(&PriceSeries::default()).unwrap().is_empty());
    }

    #[test]
    fn timestamp_is_midnight_utc() {
        let day = DailyPrice {
            date: ymd(2024, 1, 1),
            price: 1.0,
            samples: 1,
        };
        assert_eq!(day.timestamp_ms(), JAN_1);
    }
}
