use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Context, Result};
use crate::timeframe::Timeframe;

use super::{validator, ChartConfig, Config, ProviderConfig, RequestConfig};

/// Names a config file when none is passed on the command line.
pub const CONFIG_ENV_VAR: &str = "STOCK_EXPLORER_CONFIG";

/// Pick the explicit path if given, else the one named by `STOCK_EXPLORER_CONFIG`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Builtin defaults, optionally overlaid with a JSON file, then validated.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = Config::builtin();

    if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config JSON at {}", path.display()))?;
        let raw: RawConfig = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;
        raw.apply(&mut config)?;
        log::debug!("loaded config overrides from {}", path.display());
    }

    validator::validate_config(&config)?;
    Ok(config)
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    provider: Option<RawProviderConfig>,
    #[serde(default)]
    chart: Option<RawChartConfig>,
    #[serde(default)]
    default_timeframe: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawProviderConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    quote: Option<RawRequestConfig>,
    #[serde(default)]
    chart: Option<RawRequestConfig>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawRequestConfig {
    #[serde(default)]
    url_template: Option<String>,
    /// Merged over the builtin headers; an empty value removes a header.
    #[serde(default)]
    headers: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawChartConfig {
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    padding: Option<f64>,
}

impl RawConfig {
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(provider) = self.provider {
            provider.apply(&mut config.provider);
        }
        if let Some(chart) = self.chart {
            chart.apply(&mut config.chart);
        }
        if let Some(label) = self.default_timeframe {
            config.default_timeframe = label.parse::<Timeframe>()?;
        }
        Ok(())
    }
}

impl RawProviderConfig {
    fn apply(self, provider: &mut ProviderConfig) {
        if let Some(name) = self.name {
            provider.name = name;
        }
        if let Some(quote) = self.quote {
            quote.apply(&mut provider.quote);
        }
        if let Some(chart) = self.chart {
            chart.apply(&mut provider.chart);
        }
        if let Some(timeout) = self.timeout_secs {
            provider.timeout_secs = timeout;
        }
    }
}

impl RawRequestConfig {
    fn apply(self, request: &mut RequestConfig) {
        if let Some(template) = self.url_template {
            request.url_template = template;
        }
        for (name, value) in self.headers {
            if value.is_empty() {
                request.headers.remove(&name);
            } else {
                request.headers.insert(name, value);
            }
        }
    }
}

impl RawChartConfig {
    fn apply(self, chart: &mut ChartConfig) {
        if let Some(width) = self.width {
            chart.width = width;
        }
        if let Some(height) = self.height {
            chart.height = height;
        }
        if let Some(padding) = self.padding {
            chart.padding = padding;
        }
    }
}
