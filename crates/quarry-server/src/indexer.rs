//! Background re-indexing.

use crate::state::SharedState;
use quarry_core::Result;
use quarry_scanner::{ScanReport, Scanner};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Run an incremental scan on a background thread.
///
/// Searches keep hitting the current model while the scan works on a copy;
/// the copy is saved to `index_file` and then swapped in.
pub fn spawn_indexer(state: SharedState, index_file: PathBuf) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        if !state.begin_indexing() {
            info!("Scan already in progress, skipping");
            return;
        }

        match reindex(&state, &index_file) {
            Ok(report) => {
                info!(
                    indexed = report.indexed,
                    removed = report.removed,
                    "Background scan finished"
                );
                state.finish_indexing(Some(chrono::Utc::now().timestamp()));
            }
            Err(e) => {
                warn!("Background scan failed: {}", e);
                state.finish_indexing(None);
            }
        }
    })
}

fn reindex(state: &SharedState, index_file: &Path) -> Result<ScanReport> {
    let scanner = Scanner::new(state.config.clone());
    let mut model = state.model().clone();

    let report = scanner.scan_into(&mut model)?;

    if report.indexed > 0 || report.removed > 0 || report.skipped > 0 {
        model.save(index_file)?;
    }
    state.replace_model(model);
    Ok(report)
}
