//! quarry-scanner: Parallel document scanner feeding the TF-IDF model.

use quarry_core::filter::{document_kind, should_index_path, DocumentKind};
use quarry_core::{Config, Error, Result};
use quarry_index::{Doc, Model};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A file found on disk that is eligible for indexing.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub last_modified: SystemTime,
}

/// Counters describing what a scan did to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Documents (re)tokenized and inserted.
    pub indexed: usize,
    /// Documents whose modification time had not changed.
    pub unchanged: usize,
    /// Documents dropped because their file disappeared or became excluded.
    pub removed: usize,
    /// Files that could not be read or decoded.
    pub skipped: usize,
}

/// Scanner that walks the configured roots and updates a model.
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build a fresh model from every configured root.
    pub fn scan(&self) -> Result<(Model, ScanReport)> {
        let mut model = Model::new();
        let report = self.scan_into(&mut model)?;
        Ok((model, report))
    }

    /// Bring `model` up to date with the configured roots.
    ///
    /// Files whose modification time matches the indexed one are not re-read.
    /// Indexed documents below a scanned root that no longer exist are removed.
    pub fn scan_into(&self, model: &mut Model) -> Result<ScanReport> {
        info!("Starting document scan");

        let mut report = ScanReport::default();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut pending = Vec::new();

        for root in &self.config.index_roots {
            if !root.exists() {
                return Err(Error::Scanner(format!(
                    "Index root does not exist: {}",
                    root.display()
                )));
            }

            info!("Scanning root: {}", root.display());
            for file in self.collect_files(root) {
                seen.insert(file.path.clone());
                if model.requires_reindexing(&file.path, file.last_modified) {
                    pending.push(file);
                } else {
                    report.unchanged += 1;
                }
            }
        }

        let stale: Vec<PathBuf> = model
            .paths()
            .filter(|p| self.is_under_root(p) && !seen.contains(*p))
            .map(Path::to_path_buf)
            .collect();
        for path in stale {
            debug!("Removing vanished document {}", path.display());
            model.remove_document(&path);
            report.removed += 1;
        }

        let docs = self.tokenize_all(&pending)?;
        for (file, doc) in pending.into_iter().zip(docs) {
            match doc {
                Some(doc) => {
                    model.insert_doc(file.path, doc);
                    report.indexed += 1;
                }
                None => {
                    // A previously indexed version must not outlive a failed re-read.
                    model.remove_document(&file.path);
                    report.skipped += 1;
                }
            }
        }

        info!(
            "Scan complete: {} indexed, {} unchanged, {} removed, {} skipped",
            report.indexed, report.unchanged, report.removed, report.skipped
        );
        Ok(report)
    }

    /// Walk a single root and collect indexable files.
    fn collect_files(&self, root: &Path) -> Vec<ScannedFile> {
        let files: Vec<ScannedFile> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                // Only components below the root are subject to exclusions.
                let relative = e.path().strip_prefix(root).unwrap_or(e.path());
                self.should_index(relative)
            })
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Failed to walk entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| self.scan_file(e.path()))
            .collect();

        debug!("Found {} documents in {}", files.len(), root.display());
        files
    }

    /// Check if a path should be indexed.
    fn should_index(&self, path: &Path) -> bool {
        should_index_path(path, &self.config.exclusions)
    }

    fn is_under_root(&self, path: &Path) -> bool {
        self.config
            .index_roots
            .iter()
            .any(|root| path.starts_with(root))
    }

    /// Classify a file and read its modification time.
    fn scan_file(&self, path: &Path) -> Option<ScannedFile> {
        let kind = document_kind(path)?;
        let last_modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                warn!("Failed to read metadata for {}: {}", path.display(), e);
                return None;
            }
        };

        Some(ScannedFile {
            path: path.to_path_buf(),
            kind,
            last_modified,
        })
    }

    /// Read and tokenize files on a dedicated pool; order matches `files`.
    fn tokenize_all(&self, files: &[ScannedFile]) -> Result<Vec<Option<Doc>>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.performance.indexer_threads.max(1))
            .build()
            .map_err(|e| Error::Scanner(format!("Failed to build indexer pool: {e}")))?;

        Ok(pool.install(|| {
            files
                .par_iter()
                .map(|file| match extract_text(&file.path, file.kind) {
                    Ok(text) => {
                        debug!("Indexing {}", file.path.display());
                        Some(Doc::from_text(&text, file.last_modified))
                    }
                    Err(e) => {
                        warn!("Skipping {}: {}", file.path.display(), e);
                        None
                    }
                })
                .collect()
        }))
    }
}

/// Read a document and return the text that gets tokenized.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String> {
    let raw = std::fs::read_to_string(path)?;
    Ok(match kind {
        DocumentKind::Html => nanohtml2text::html2text(&raw),
        DocumentKind::Text => raw,
    })
}
