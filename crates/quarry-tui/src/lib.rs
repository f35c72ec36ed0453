//! quarry-tui: Terminal UI for quarry search.

pub mod app;
pub mod state;
pub mod ui;
mod worker;

pub use app::run;
pub use state::{AppMode, AppState};
