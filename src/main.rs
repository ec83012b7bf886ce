mod cli;

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use stock_explorer::app::bootstrap::{load_runtime_config, run_interactive, run_show};
use stock_explorer::config::validator::validate_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Commands::Interactive { .. });
    init_logging(cli.log_file.as_deref(), interactive)?;

    let mut config = load_runtime_config(cli.config.clone())?;

    match cli.command {
        Commands::Interactive { symbol, timeframe } => {
            run_interactive(config, symbol, timeframe).await?;
        }
        Commands::Show {
            symbol,
            timeframe,
            width,
            height,
        } => {
            if let Some(width) = width {
                config.chart.width = width;
            }
            if let Some(height) = height {
                config.chart.height = height;
            }
            validate_config(&config)?;
            let canvas = config.chart.canvas();
            run_show(config, &symbol, timeframe, canvas).await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` controls the filter (default `warn`). The explorer owns the
/// terminal, so without `--log-file` it logs nothing.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if interactive => return Ok(()),
        None => {}
    }

    builder.init();
    Ok(())
}
