//! Quarry TUI - terminal front end for a quarry search server.

use anyhow::{Context, Result};
use quarry_core::build_info::{wants_version, BUILD_INFO};
use quarry_core::{paths, Config};

fn main() -> Result<()> {
    if wants_version() {
        println!("{}", BUILD_INFO.version_line("quarry-tui"));
        return Ok(());
    }

    // Anything printed to the terminal would tear the alternate screen.
    quarry_core::logging::init_to_file(&paths::tui_log_path())?;

    let config = Config::load_or_default().context("loading configuration")?;

    if let Some(link) = quarry_tui::run(&config)? {
        println!("{link}");
    }
    Ok(())
}
