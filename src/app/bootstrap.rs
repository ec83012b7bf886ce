use std::path::PathBuf;

use log::info;

use crate::app::controller::{Orchestrator, RunOutcome};
use crate::app::state::ViewState;
use crate::config::{load_config, resolve_config_path, Config};
use crate::error::{AppError, Result, USER_ERROR_MESSAGE};
use crate::fetch::YahooClient;
use crate::geometry::{compute_geometry, Canvas, Chart};
use crate::timeframe::Timeframe;
use crate::ui::run_explorer;

/// Load the config named by `--config`, falling back to the environment and
/// then to the builtin defaults.
pub fn load_runtime_config(explicit: Option<PathBuf>) -> Result<Config> {
    let path = resolve_config_path(explicit);
    if let Some(path) = &path {
        info!("using config file {}", path.display());
    }
    load_config(path.as_deref())
}

pub async fn run_interactive(
    config: Config,
    symbol: Option<String>,
    timeframe: Option<Timeframe>,
) -> Result<()> {
    let client = YahooClient::new(&config.provider)?;
    let orchestrator = Orchestrator::new(client, timeframe.unwrap_or(config.default_timeframe));
    run_explorer(orchestrator, config.chart.canvas(), symbol).await
}

/// Fetch once and print the profile card and chart summary.
pub async fn run_show(
    config: Config,
    symbol: &str,
    timeframe: Option<Timeframe>,
    canvas: Canvas,
) -> Result<()> {
    let timeframe = timeframe.unwrap_or(config.default_timeframe);
    let client = YahooClient::new(&config.provider)?;
    let orchestrator = Orchestrator::new(client, timeframe);

    let request = orchestrator
        .begin(symbol, timeframe)
        .ok_or_else(|| AppError::message("A ticker symbol is required."))?;

    match orchestrator.run(request).await {
        RunOutcome::Succeeded => {
            let view = orchestrator.snapshot();
            let chart = compute_geometry(&view.series, canvas);
            println!("{}", format_summary(&view, &chart));
            Ok(())
        }
        RunOutcome::Failed | RunOutcome::Superseded => {
            Err(AppError::message(USER_ERROR_MESSAGE))
        }
    }
}

/// Plain-text rendering of a loaded view.
pub fn format_summary(view: &ViewState, chart: &Chart) -> String {
    let mut lines = Vec::new();

    if let Some(profile) = &view.profile {
        lines.push(format!("{} ({})", profile.display_name(), profile.symbol));
        lines.push(format!("{}  {}", profile.price_text(), profile.change_text()));
        let classification = [profile.sector.as_deref(), profile.industry.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        if !classification.is_empty() {
            lines.push(classification.join(" · "));
        }
        if let Some(cap) = profile.market_cap_text() {
            lines.push(format!("Market cap {cap}"));
        }
        if let Some(site) = profile.website_label() {
            lines.push(site.to_string());
        }
        lines.push(String::new());
    }

    let timeframe = view.selected_timeframe;
    match chart.geometry() {
        None => {
            lines.push(format!("{timeframe} ({}): No chart data found.", timeframe.interval));
        }
        Some(geometry) => {
            lines.push(format!(
                "{timeframe} ({}): {} points",
                timeframe.interval,
                geometry.points.len()
            ));
            lines.push(format!(
                "High {} · Low {}",
                geometry.max.label, geometry.min.label
            ));
            let dates = geometry
                .date_labels
                .iter()
                .map(|label| label.text.as_str())
                .collect::<Vec<_>>();
            lines.push(dates.join(" … "));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_geometry_in;
    use crate::stock::{PricePoint, StockProfile};
    use chrono::Utc;

    fn loaded_view(closes: &[f64]) -> ViewState {
        let mut view = ViewState::default();
        view.profile = Some(StockProfile {
            symbol: "AAPL".to_string(),
            short_name: Some("Apple Inc.".to_string()),
            regular_market_price: Some(150.25),
            regular_market_change_percent: Some(-1.5),
            ..Default::default()
        });
        view.series = closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                timestamp_millis: 1_705_320_000_000 + i as i64 * 86_400_000,
                close_price: *close,
            })
            .collect();
        view
    }

    #[test]
    fn summary_lists_profile_and_chart() {
        let view = loaded_view(&[148.0, 149.5, 151.0, 150.0, 150.25]);
        let chart = compute_geometry_in(&view.series, Canvas::new(720.0, 230.0, 32.0), &Utc);

        let summary = format_summary(&view, &chart);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Apple Inc. (AAPL)");
        assert_eq!(lines[1], "$150.25  ▼ 1.50%");
        assert_eq!(lines[3], "1M (1d): 5 points");
        assert_eq!(lines[4], "High $151.00 · Low $148.00");
        assert_eq!(lines[5], "01/15 … 01/17 … 01/19");
    }

    #[test]
    fn summary_reports_an_empty_chart() {
        let view = loaded_view(&[]);
        let chart = compute_geometry(&view.series, Canvas::new(720.0, 230.0, 32.0));

        let summary = format_summary(&view, &chart);
        assert!(summary.ends_with("1M (1d): No chart data found."), "{summary}");
    }
}
