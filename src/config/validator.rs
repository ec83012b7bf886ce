use crate::error::{AppError, Result};

use super::{ChartConfig, Config, RequestConfig};

const QUOTE_PLACEHOLDERS: &[&str] = &["{symbol}"];
const CHART_PLACEHOLDERS: &[&str] = &["{symbol}", "{interval}", "{period1}", "{period2}"];

/// Validate a config and report every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_request("provider.quote", &config.provider.quote, QUOTE_PLACEHOLDERS, &mut issues);
    validate_request("provider.chart", &config.provider.chart, CHART_PLACEHOLDERS, &mut issues);
    if config.provider.timeout_secs == 0 {
        issues.push("provider.timeout_secs must be greater than zero".to_string());
    }
    validate_chart(&config.chart, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_request(
    name: &str,
    request: &RequestConfig,
    placeholders: &[&str],
    issues: &mut Vec<String>,
) {
    if request.url_template.trim().is_empty() {
        issues.push(format!("{name}.url_template must not be empty"));
        return;
    }

    for placeholder in placeholders {
        if !request.url_template.contains(placeholder) {
            issues.push(format!(
                "{name}.url_template should reference `{placeholder}`"
            ));
        }
    }

    for header in request.headers.keys() {
        if header.trim().is_empty() {
            issues.push(format!("{name}.headers contains an empty header name"));
        }
    }
}

fn validate_chart(chart: &ChartConfig, issues: &mut Vec<String>) {
    if !(chart.width.is_finite() && chart.width > 0.0) {
        issues.push(format!("chart.width must be positive, found {}", chart.width));
    }
    if !(chart.height.is_finite() && chart.height > 0.0) {
        issues.push(format!("chart.height must be positive, found {}", chart.height));
    }
    if !(chart.padding.is_finite() && chart.padding >= 0.0) {
        issues.push(format!(
            "chart.padding must be zero or positive, found {}",
            chart.padding
        ));
    } else if chart.padding * 2.0 >= chart.height {
        issues.push(format!(
            "chart.padding {} leaves no room inside height {}",
            chart.padding, chart.height
        ));
    }
}
