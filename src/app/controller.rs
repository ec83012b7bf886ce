use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::state::{Phase, RequestState, ViewState};
use crate::fetch::{FetchResult, StockSource};
use crate::normalize::{normalize_profile, normalize_series};
use crate::stock::{PriceSeries, StockProfile, Symbol};
use crate::timeframe::{TimeWindow, Timeframe};

/// How a single fetch attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
    /// A newer submit took over before this attempt could commit.
    Superseded,
}

struct Shared<S> {
    source: S,
    state: watch::Sender<ViewState>,
}

/// Drives quote and chart fetches for the view. Every submit bumps the
/// generation; results from older generations are discarded.
pub struct Orchestrator<S: StockSource> {
    shared: Arc<Shared<S>>,
}

impl<S: StockSource> Clone for Orchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: StockSource> Orchestrator<S> {
    pub fn new(source: S, initial_timeframe: Timeframe) -> Self {
        let (state, _) = watch::channel(ViewState::new(initial_timeframe));
        Self {
            shared: Arc::new(Shared { source, state }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.shared.state.borrow().clone()
    }

    /// Record a new `(symbol, timeframe)` selection and return the request to
    /// run, or `None` when the symbol is blank and the view was cleared.
    pub fn begin(&self, raw_symbol: &str, timeframe: Timeframe) -> Option<RequestState> {
        let Some(symbol) = Symbol::parse(raw_symbol) else {
            self.shared.state.send_modify(|state| state.clear(timeframe));
            debug!("cleared view for blank symbol");
            return None;
        };

        let mut request = None;
        self.shared.state.send_modify(|state| {
            request = Some(state.start(symbol, timeframe));
        });
        if let Some(request) = &request {
            info!(
                "loading {} ({}) as generation {}",
                request.symbol, request.timeframe, request.generation
            );
        }
        request
    }

    /// Fetch, normalize, and commit the result if `request` is still current.
    pub async fn run(&self, request: RequestState) -> RunOutcome {
        let generation = request.generation;
        match self.load(&request).await {
            Ok(Some((profile, series))) => {
                let points = series.len();
                let committed = self
                    .shared
                    .state
                    .send_if_modified(|state| state.commit_success(generation, profile, series));
                if committed {
                    info!(
                        "loaded {} ({}): {points} points",
                        request.symbol, request.timeframe
                    );
                    RunOutcome::Succeeded
                } else {
                    self.discard(&request);
                    RunOutcome::Superseded
                }
            }
            Ok(None) => {
                self.discard(&request);
                RunOutcome::Superseded
            }
            Err(err) => {
                let committed = self
                    .shared
                    .state
                    .send_if_modified(|state| state.commit_failure(generation));
                if committed {
                    warn!(
                        "fetch for {} ({}) failed [{}]: {err}",
                        request.symbol,
                        request.timeframe,
                        err.kind()
                    );
                    RunOutcome::Failed
                } else {
                    debug!("ignoring stale failure for {}: {err}", request.symbol);
                    RunOutcome::Superseded
                }
            }
        }
    }

    /// `begin` followed by `run` on a spawned task. Must be called from
    /// within a tokio runtime.
    pub fn submit(&self, raw_symbol: &str, timeframe: Timeframe) -> Option<JoinHandle<RunOutcome>> {
        let request = self.begin(raw_symbol, timeframe)?;
        let orchestrator = self.clone();
        Some(tokio::spawn(async move { orchestrator.run(request).await }))
    }

    pub fn current_phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    fn is_current(&self, generation: u64) -> bool {
        self.shared.state.borrow().is_current(generation)
    }

    /// `Ok(None)` means the request went stale between the two calls and the
    /// chart was never requested.
    async fn load(
        &self,
        request: &RequestState,
    ) -> FetchResult<Option<(StockProfile, PriceSeries)>> {
        let source = &self.shared.source;
        let sections = source.fetch_quote(&request.symbol).await?;
        if !self.is_current(request.generation) {
            return Ok(None);
        }

        let window = TimeWindow::ending_now(&request.timeframe);
        let candles = source
            .fetch_chart(&request.symbol, request.timeframe, window)
            .await?;

        let profile = normalize_profile(
            &sections.price,
            &sections.asset_profile,
            request.symbol.as_str(),
        );
        let series = normalize_series(&candles)?;
        Ok(Some((profile, series)))
    }

    fn discard(&self, request: &RequestState) {
        debug!(
            "discarding stale result for {} (generation {})",
            request.symbol, request.generation
        );
    }
}
