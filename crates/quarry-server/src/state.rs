//! Shared server state.

use quarry_core::Config;
use quarry_index::Model;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard};

pub type SharedState = Arc<ServerState>;

/// State shared between request handlers and the background indexer.
pub struct ServerState {
    pub config: Config,
    model: RwLock<Model>,
    indexing: AtomicBool,
    last_indexed: AtomicI64,
}

impl ServerState {
    pub fn new(config: Config, model: Model) -> Self {
        Self {
            config,
            model: RwLock::new(model),
            indexing: AtomicBool::new(false),
            last_indexed: AtomicI64::new(0),
        }
    }

    pub fn shared(config: Config, model: Model) -> SharedState {
        Arc::new(Self::new(config, model))
    }

    /// Read access to the model.
    ///
    /// A writer that panicked mid-swap leaves the previous model in place, so a
    /// poisoned lock is still safe to read.
    pub fn model(&self) -> RwLockReadGuard<'_, Model> {
        self.model.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the model wholesale.
    pub fn replace_model(&self, model: Model) {
        let mut guard = self
            .model
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = model;
    }

    pub fn is_indexing(&self) -> bool {
        self.indexing.load(Ordering::Relaxed)
    }

    /// Mark a scan as started. Returns `false` if one is already running.
    pub fn begin_indexing(&self) -> bool {
        self.indexing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    pub fn finish_indexing(&self, completed_at: Option<i64>) {
        if let Some(ts) = completed_at {
            self.last_indexed.store(ts, Ordering::Relaxed);
        }
        self.indexing.store(false, Ordering::Release);
    }

    pub fn last_indexed(&self) -> i64 {
        self.last_indexed.load(Ordering::Relaxed)
    }

    /// Map a request path back to an indexed document, if any.
    ///
    /// Links are rendered as `"/" + id`, so both `id` and `"/" + id` are tried
    /// to cover relative and absolute document paths.
    pub fn resolve_document(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() {
            return None;
        }
        let model = self.model();
        let relative = Path::new(id);
        if model.contains(relative) {
            return Some(relative.to_path_buf());
        }
        let absolute = PathBuf::from(format!("/{id}"));
        model.contains(&absolute).then_some(absolute)
    }
}
