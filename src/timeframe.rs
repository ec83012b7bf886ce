use std::fmt;
use std::str::FromStr;

use chrono::Duration as ChronoDuration;

use crate::error::AppError;

/// Lookback range requested from the candle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeValue {
    OneDay,
    OneMonth,
    SixMonths,
    OneYear,
}

impl RangeValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeValue::OneDay => "1d",
            RangeValue::OneMonth => "1mo",
            RangeValue::SixMonths => "6mo",
            RangeValue::OneYear => "1y",
        }
    }

    fn lookback_days(&self) -> i64 {
        match self {
            RangeValue::OneDay => 2,
            RangeValue::OneMonth => 31,
            RangeValue::SixMonths => 182,
            RangeValue::OneYear => 366,
        }
    }
}

/// A selectable chart range with its sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    pub label: &'static str,
    pub range: RangeValue,
    pub interval: &'static str,
}

const TIMEFRAMES: [Timeframe; 4] = [
    Timeframe {
        label: "1D",
        range: RangeValue::OneDay,
        interval: "5m",
    },
    Timeframe {
        label: "1M",
        range: RangeValue::OneMonth,
        interval: "1d",
    },
    Timeframe {
        label: "6M",
        range: RangeValue::SixMonths,
        interval: "1d",
    },
    Timeframe {
        label: "1Y",
        range: RangeValue::OneYear,
        interval: "1wk",
    },
];

const DEFAULT_INDEX: usize = 1;

impl Timeframe {
    pub fn all() -> &'static [Timeframe] {
        &TIMEFRAMES
    }

    pub fn lookback(&self) -> ChronoDuration {
        ChronoDuration::days(self.range.lookback_days())
    }

    pub fn index(&self) -> usize {
        TIMEFRAMES
            .iter()
            .position(|candidate| candidate.range == self.range)
            .unwrap_or(DEFAULT_INDEX)
    }

    pub fn next(&self) -> Timeframe {
        TIMEFRAMES[(self.index() + 1) % TIMEFRAMES.len()]
    }

    pub fn previous(&self) -> Timeframe {
        TIMEFRAMES[(self.index() + TIMEFRAMES.len() - 1) % TIMEFRAMES.len()]
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        TIMEFRAMES[DEFAULT_INDEX]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    /// Accepts either the display label (`1M`) or the range value (`1mo`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        TIMEFRAMES
            .iter()
            .find(|tf| tf.label.eq_ignore_ascii_case(trimmed) || tf.range.as_str() == trimmed)
            .copied()
            .ok_or_else(|| {
                AppError::message(format!(
                    "Unknown timeframe `{trimmed}` (expected one of 1D, 1M, 6M, 1Y)"
                ))
            })
    }
}

/// Inclusive `[period1, period2]` window in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub period1: i64,
    pub period2: i64,
}

impl TimeWindow {
    pub fn ending_at(now_secs: i64, timeframe: &Timeframe) -> Self {
        Self {
            period1: now_secs - timeframe.lookback().num_seconds(),
            period2: now_secs,
        }
    }

    pub fn ending_now(timeframe: &Timeframe) -> Self {
        Self::ending_at(chrono::Utc::now().timestamp(), timeframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_four_entries_in_display_order() {
        let labels: Vec<_> = Timeframe::all().iter().map(|tf| tf.label).collect();
        assert_eq!(labels, ["1D", "1M", "6M", "1Y"]);

        let intervals: Vec<_> = Timeframe::all().iter().map(|tf| tf.interval).collect();
        assert_eq!(intervals, ["5m", "1d", "1d", "1wk"]);
    }

    #[test]
    fn default_is_one_month() {
        let tf = Timeframe::default();
        assert_eq!(tf.label, "1M");
        assert_eq!(tf.range, RangeValue::OneMonth);
    }

    #[test]
    fn window_subtracts_lookback_seconds() {
        let now = 1_700_000_000;
        let expected_days = [2, 31, 182, 366];
        for (tf, days) in Timeframe::all().iter().zip(expected_days) {
            let window = TimeWindow::ending_at(now, tf);
            assert_eq!(window.period2, now);
            assert_eq!(window.period1, now - days * 24 * 60 * 60, "{}", tf.label);
        }
    }

    #[test]
    fn parses_labels_and_range_values() {
        assert_eq!("1d".parse::<Timeframe>().unwrap().label, "1D");
        assert_eq!("1mo".parse::<Timeframe>().unwrap().label, "1M");
        assert_eq!("6M".parse::<Timeframe>().unwrap().label, "6M");
        assert_eq!(" 1y ".parse::<Timeframe>().unwrap().label, "1Y");
        assert!("5y".parse::<Timeframe>().is_err());
    }

    #[test]
    fn cycles_wrap_around() {
        let first = Timeframe::all()[0];
        let last = Timeframe::all()[3];
        assert_eq!(last.next(), first);
        assert_eq!(first.previous(), last);
        assert_eq!(Timeframe::default().next().label, "6M");
    }
}
