use crate::error::USER_ERROR_MESSAGE;
use crate::stock::{PriceSeries, StockProfile, Symbol};
use crate::timeframe::Timeframe;

/// `Idle → Loading → {Success, Failure}`; any submit re-enters `Loading`
/// (or `Idle` when the symbol is cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// One fetch attempt. Only the attempt holding the latest generation may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub generation: u64,
}

/// Everything the view reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub error: Option<String>,
    pub profile: Option<StockProfile>,
    pub series: PriceSeries,
    pub selected_timeframe: Timeframe,
    pub request: Option<RequestState>,
    pub generation: u64,
}

impl ViewState {
    pub fn new(selected_timeframe: Timeframe) -> Self {
        Self {
            phase: Phase::Idle,
            error: None,
            profile: None,
            series: PriceSeries::new(),
            selected_timeframe,
            request: None,
            generation: 0,
        }
    }

    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub(crate) fn clear(&mut self, timeframe: Timeframe) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.error = None;
        self.profile = None;
        self.series.clear();
        self.selected_timeframe = timeframe;
        self.request = None;
    }

    pub(crate) fn start(&mut self, symbol: Symbol, timeframe: Timeframe) -> RequestState {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.error = None;
        self.profile = None;
        self.series.clear();
        self.selected_timeframe = timeframe;

        let request = RequestState {
            symbol,
            timeframe,
            generation: self.generation,
        };
        self.request = Some(request.clone());
        request
    }

    /// Returns `false`, leaving the state untouched, if `generation` is stale.
    pub(crate) fn commit_success(
        &mut self,
        generation: u64,
        profile: StockProfile,
        series: PriceSeries,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Success;
        self.error = None;
        self.profile = Some(profile);
        self.series = series;
        true
    }

    /// Returns `false`, leaving the state untouched, if `generation` is stale.
    pub(crate) fn commit_failure(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Failure;
        self.error = Some(USER_ERROR_MESSAGE.to_string());
        self.profile = None;
        self.series.clear();
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Timeframe::default())
    }
}
