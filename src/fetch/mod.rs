use futures::future::BoxFuture;

use crate::error::FetchError;
use crate::stock::Symbol;
use crate::timeframe::{TimeWindow, Timeframe};

pub mod decode;
pub mod request;
pub mod yahoo;

pub use decode::{ChartPayload, QuoteSections};
pub use yahoo::YahooClient;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Upstream access used by the orchestrator. Returns raw payloads; shaping
/// them into the view model is the normalizer's job.
pub trait StockSource: Send + Sync + 'static {
    fn fetch_quote<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, FetchResult<QuoteSections>>;

    fn fetch_chart<'a>(
        &'a self,
        symbol: &'a Symbol,
        timeframe: Timeframe,
        window: TimeWindow,
    ) -> BoxFuture<'a, FetchResult<ChartPayload>>;
}
