use std::fmt;

use crate::utils::{abbreviate_number, strip_url_scheme};

/// Trimmed, upper-cased ticker. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Normalize raw user input; `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Symbol(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quote and company profile merged into one view model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockProfile {
    pub symbol: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
    Unknown,
}

impl StockProfile {
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or("---")
    }

    pub fn price_text(&self) -> String {
        match self.regular_market_price {
            Some(price) => format!("${price:.2}"),
            None => "$--".to_string(),
        }
    }

    pub fn change_direction(&self) -> ChangeDirection {
        match self.regular_market_change_percent {
            Some(change) if change > 0.0 => ChangeDirection::Up,
            Some(change) if change < 0.0 => ChangeDirection::Down,
            Some(_) => ChangeDirection::Flat,
            None => ChangeDirection::Unknown,
        }
    }

    /// `▲ 1.20%`, `▼ 1.50%`, `0.00%`, or `--%` when unknown.
    pub fn change_text(&self) -> String {
        let Some(change) = self.regular_market_change_percent else {
            return "--%".to_string();
        };
        let arrow = match self.change_direction() {
            ChangeDirection::Up => "▲ ",
            ChangeDirection::Down => "▼ ",
            _ => "",
        };
        format!("{arrow}{:.2}%", change.abs())
    }

    pub fn market_cap_text(&self) -> Option<String> {
        self.market_cap
            .filter(|cap| *cap != 0.0)
            .map(|cap| format!("${}", abbreviate_number(cap)))
    }

    pub fn website_label(&self) -> Option<&str> {
        self.website.as_deref().map(strip_url_scheme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_millis: i64,
    pub close_price: f64,
}

/// Closing prices in upstream order. Every close is finite.
pub type PriceSeries = Vec<PricePoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_upper_cased() {
        assert_eq!(Symbol::parse("  aapl ").unwrap().as_str(), "AAPL");
        assert!(Symbol::parse("   ").is_none());
        assert!(Symbol::parse("").is_none());
    }

    #[test]
    fn formats_price_and_negative_change() {
        let profile = StockProfile {
            symbol: "AAPL".to_string(),
            regular_market_price: Some(150.25),
            regular_market_change_percent: Some(-1.5),
            ..Default::default()
        };
        assert_eq!(profile.price_text(), "$150.25");
        assert_eq!(profile.change_text(), "▼ 1.50%");
        assert_eq!(profile.change_direction(), ChangeDirection::Down);
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let profile = StockProfile {
            symbol: "ZZZ".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "---");
        assert_eq!(profile.price_text(), "$--");
        assert_eq!(profile.change_text(), "--%");
        assert_eq!(profile.market_cap_text(), None);
        assert_eq!(profile.website_label(), None);
    }

    #[test]
    fn positive_and_flat_changes() {
        let mut profile = StockProfile {
            regular_market_change_percent: Some(2.346),
            ..Default::default()
        };
        assert_eq!(profile.change_text(), "▲ 2.35%");

        profile.regular_market_change_percent = Some(0.0);
        assert_eq!(profile.change_text(), "0.00%");
        assert_eq!(profile.change_direction(), ChangeDirection::Flat);
    }

    #[test]
    fn name_falls_back_to_long_name() {
        let profile = StockProfile {
            long_name: Some("Apple Inc.".to_string()),
            website: Some("https://www.apple.com".to_string()),
            market_cap: Some(2.5e12),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "Apple Inc.");
        assert_eq!(profile.website_label(), Some("www.apple.com"));
        assert_eq!(profile.market_cap_text().as_deref(), Some("$2.50T"));
    }
}
