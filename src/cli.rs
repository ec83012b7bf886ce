use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stock_explorer::Timeframe;

#[derive(Debug, Parser)]
#[command(name = "stock-explorer")]
#[command(about = "Look up a ticker's profile and price history from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file layered over the builtin configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append log output to this file (interactive mode logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the terminal explorer
    Interactive {
        /// Ticker to load on start
        symbol: Option<String>,

        /// 1D, 1M, 6M or 1Y
        #[arg(short, long)]
        timeframe: Option<Timeframe>,
    },

    /// Fetch one ticker and print its profile and chart summary
    Show {
        symbol: String,

        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// Chart canvas width
        #[arg(long)]
        width: Option<f64>,

        /// Chart canvas height
        #[arg(long)]
        height: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_overrides() {
        let cli = Cli::try_parse_from([
            "stock-explorer",
            "show",
            "aapl",
            "--timeframe",
            "6mo",
            "--width",
            "480",
            "--config",
            "local.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("local.json")));
        match cli.command {
            Commands::Show {
                symbol,
                timeframe,
                width,
                height,
            } => {
                assert_eq!(symbol, "aapl");
                assert_eq!(timeframe.map(|tf| tf.label), Some("6M"));
                assert_eq!(width, Some(480.0));
                assert_eq!(height, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_timeframes() {
        let result = Cli::try_parse_from(["stock-explorer", "interactive", "-t", "3M"]);
        assert!(result.is_err());
    }
}
