//! quarry-index: Tokenizer, TF-IDF model, and index persistence.

pub mod lexer;
pub mod model;
mod persist;

pub use lexer::{tokenize, Lexer};
pub use model::{Doc, Model, ScoredDoc, TermFreq};
