pub mod bootstrap;
pub mod controller;
pub mod state;

pub use controller::{Orchestrator, RunOutcome};
pub use state::{Phase, RequestState, ViewState};
