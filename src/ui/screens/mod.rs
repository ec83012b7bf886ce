pub mod explorer;

pub use explorer::{handle_key, run_explorer, ExplorerCommand};
