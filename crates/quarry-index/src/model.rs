//! TF-IDF document model.

use crate::lexer::Lexer;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Term -> number of occurrences.
pub type TermFreq = HashMap<String, usize>;

/// A single indexed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doc {
    /// Occurrences of each term in this document.
    pub tf: TermFreq,
    /// Total number of tokens in the document.
    pub count: usize,
    /// Modification time of the file when it was indexed.
    pub last_modified: SystemTime,
}

/// A document matched by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub path: PathBuf,
    pub score: f32,
}

/// The whole index: per-document term frequencies plus document frequencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    docs: HashMap<PathBuf, Doc>,
    /// Term -> number of documents containing it.
    df: HashMap<String, usize>,
}

impl Doc {
    /// Tokenize `content` and count its terms.
    pub fn from_chars(content: &[char], last_modified: SystemTime) -> Self {
        let mut tf = TermFreq::new();
        let mut count = 0;
        for token in Lexer::new(content) {
            *tf.entry(token).or_insert(0) += 1;
            count += 1;
        }

        Self {
            tf,
            count,
            last_modified,
        }
    }

    pub fn from_text(text: &str, last_modified: SystemTime) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::from_chars(&chars, last_modified)
    }

    /// Relative frequency of `term` in this document.
    pub fn term_frequency(&self, term: &str) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.tf.get(term).copied().unwrap_or(0) as f32 / self.count as f32
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of distinct terms across all documents.
    pub fn term_count(&self) -> usize {
        self.df.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.docs.contains_key(path)
    }

    pub fn doc(&self, path: &Path) -> Option<&Doc> {
        self.docs.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.docs.keys().map(PathBuf::as_path)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.df.get(term).copied().unwrap_or(0)
    }

    /// `true` unless `path` is indexed with exactly this modification time.
    pub fn requires_reindexing(&self, path: &Path, last_modified: SystemTime) -> bool {
        match self.docs.get(path) {
            Some(doc) => doc.last_modified != last_modified,
            None => true,
        }
    }

    /// Tokenize and index `content` under `path`, replacing any previous version.
    pub fn add_document(&mut self, path: PathBuf, last_modified: SystemTime, content: &[char]) {
        self.insert_doc(path, Doc::from_chars(content, last_modified));
    }

    /// Index an already-tokenized document, replacing any previous version.
    pub fn insert_doc(&mut self, path: PathBuf, doc: Doc) {
        self.remove_document(&path);

        for term in doc.tf.keys() {
            *self.df.entry_ref(term.as_str()).or_insert(0) += 1;
        }
        self.docs.insert(path, doc);
    }

    /// Drop `path` from the index. Returns `false` if it was not indexed.
    pub fn remove_document(&mut self, path: &Path) -> bool {
        let Some(doc) = self.docs.remove(path) else {
            return false;
        };

        for term in doc.tf.keys() {
            if let Some(freq) = self.df.get_mut(term) {
                *freq -= 1;
                if *freq == 0 {
                    self.df.remove(term);
                }
            }
        }
        true
    }

    /// Inverse document frequency of `term`.
    pub fn inverse_document_frequency(&self, term: &str) -> f32 {
        let n = self.docs.len() as f32;
        let m = self.document_frequency(term).max(1) as f32;
        (n / m).log2()
    }

    /// Rank documents against `query`.
    ///
    /// Documents scoring zero are left out. Ties are broken by path so the
    /// order is stable across runs.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredDoc> {
        let chars: Vec<char> = query.chars().collect();
        let terms: Vec<(String, f32)> = Lexer::new(&chars)
            .map(|term| {
                let idf = self.inverse_document_frequency(&term);
                (term, idf)
            })
            .collect();

        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<ScoredDoc> = self
            .docs
            .iter()
            .filter_map(|(path, doc)| {
                let score: f32 = terms
                    .iter()
                    .map(|(term, idf)| doc.term_frequency(term) * idf)
                    .sum();
                (score > 0.0).then(|| ScoredDoc {
                    path: path.clone(),
                    score,
                })
            })
            .collect();

        ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.path.cmp(&b.path),
            other => other,
        });
        ranked.truncate(limit);
        ranked
    }
}
