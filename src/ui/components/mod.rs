pub mod chart;
pub mod profile;
pub mod terminal;
pub mod utils;

pub use terminal::TerminalGuard;
