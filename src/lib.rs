pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod geometry;
pub mod normalize;
pub mod stock;
pub mod timeframe;
pub mod ui;
pub mod utils;

pub use app::{Orchestrator, Phase, RequestState, RunOutcome, ViewState};
pub use error::{AppError, FetchError, Result, USER_ERROR_MESSAGE};
pub use fetch::{StockSource, YahooClient};
pub use geometry::{compute_geometry, Chart, ChartGeometry};
pub use stock::{PricePoint, PriceSeries, StockProfile, Symbol};
pub use timeframe::{TimeWindow, Timeframe};
