//! quarry-server: HTTP search server over a TF-IDF index.

mod error;
pub mod indexer;
pub mod router;
pub mod state;

use quarry_core::{Config, Error, Result};
use quarry_index::Model;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use router::create_router;
pub use state::{ServerState, SharedState};

/// Load the index, start background indexing if configured, and serve until
/// Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let model = Model::load_or_default(&config.index_path)?;
    info!("Index ready: {} documents", model.len());

    let index_file = config.index_path.clone();
    let reindex = config.server.reindex_on_start && !config.index_roots.is_empty();
    let bind = config.server.bind.clone();
    let state = ServerState::shared(config, model);

    if reindex {
        // Detached: the process exits with the server, taking the thread along.
        let _indexer = indexer::spawn_indexer(state.clone(), index_file);
    }

    let listener = TcpListener::bind(&bind)
        .await
        .map_err(|e| Error::Server(format!("Could not bind {bind}: {e}")))?;

    serve_listener(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_listener<F>(listener: TcpListener, state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Server started at http://{addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
