use std::collections::HashMap;

use crate::geometry::Canvas;
use crate::timeframe::Timeframe;

pub mod loader;
pub mod validator;

pub use loader::{load_config, resolve_config_path, CONFIG_ENV_VAR};

const YAHOO_QUOTE_URL: &str =
    "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{symbol}?modules=price,assetProfile";
const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?interval={interval}&period1={period1}&period2={period2}";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One upstream call: a URL template plus headers. Header values may embed
/// `${ENV_VAR}` placeholders, expanded when the client is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub url_template: String,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub name: String,
    pub quote: RequestConfig,
    pub chart: RequestConfig,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height, self.padding)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub provider: ProviderConfig,
    pub chart: ChartConfig,
    pub default_timeframe: Timeframe,
}

impl Config {
    pub fn builtin() -> Self {
        let headers = HashMap::from([
            ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("Accept-Language".to_string(), "en-US,en;q=0.9".to_string()),
        ]);

        Config {
            provider: ProviderConfig {
                name: "Yahoo Finance".to_string(),
                quote: RequestConfig {
                    url_template: YAHOO_QUOTE_URL.to_string(),
                    headers: headers.clone(),
                },
                chart: RequestConfig {
                    url_template: YAHOO_CHART_URL.to_string(),
                    headers,
                },
                timeout_secs: 10,
            },
            chart: ChartConfig {
                width: 720.0,
                height: 230.0,
                padding: 32.0,
            },
            default_timeframe: Timeframe::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
