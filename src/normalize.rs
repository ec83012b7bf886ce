//! Pure conversions from upstream payloads into the view model.

use crate::error::FetchError;
use crate::fetch::decode::{value_to_f64, value_to_text, ChartPayload, RawFields};
use crate::fetch::FetchResult;
use crate::stock::{PricePoint, PriceSeries, StockProfile};

/// Merge the quote and profile objects. Quote fields win on collision and
/// `symbol` is always the upper-cased request symbol.
pub fn normalize_profile(quote: &RawFields, profile: &RawFields, symbol: &str) -> StockProfile {
    let text = |key: &str| {
        quote
            .get(key)
            .and_then(value_to_text)
            .or_else(|| profile.get(key).and_then(value_to_text))
    };
    let number = |key: &str| {
        quote
            .get(key)
            .and_then(value_to_f64)
            .or_else(|| profile.get(key).and_then(value_to_f64))
    };

    StockProfile {
        symbol: symbol.trim().to_uppercase(),
        short_name: text("shortName"),
        long_name: text("longName"),
        sector: text("sector"),
        industry: text("industry"),
        website: text("website"),
        regular_market_price: number("regularMarketPrice"),
        regular_market_change_percent: number("regularMarketChangePercent"),
        market_cap: number("marketCap"),
    }
}

/// Pair timestamps with closes by index, keeping finite closes only.
pub fn normalize_series(candles: &ChartPayload) -> FetchResult<PriceSeries> {
    let result = candles.first_result().ok_or(FetchError::NoChartData)?;

    let series = result
        .timestamp
        .iter()
        .zip(result.closes())
        .filter_map(|(timestamp, close)| {
            let seconds = (*timestamp)?;
            let close_price = close.filter(|value| value.is_finite())?;
            Some(PricePoint {
                timestamp_millis: seconds.checked_mul(1000)?,
                close_price,
            })
        })
        .collect();

    Ok(series)
}
