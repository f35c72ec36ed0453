//! Tokenizer shared by indexing and querying.
//!
//! Words are lowercased and reduced to their English stem so that "indexes"
//! and "indexing" land on the same term. Digit runs are kept whole, and any
//! other non-whitespace character is a token of its own.

use rust_stemmers::{Algorithm, Stemmer};

/// Streaming tokenizer over a slice of chars.
pub struct Lexer<'a> {
    content: &'a [char],
    stemmer: Stemmer,
}

impl<'a> Lexer<'a> {
    pub fn new(content: &'a [char]) -> Self {
        Self {
            content,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    fn trim_left(&mut self) {
        let skip = self
            .content
            .iter()
            .take_while(|c| c.is_whitespace())
            .count();
        self.content = &self.content[skip..];
    }

    fn chop(&mut self, n: usize) -> &'a [char] {
        let (token, rest) = self.content.split_at(n);
        self.content = rest;
        token
    }

    fn chop_while<P>(&mut self, mut predicate: P) -> &'a [char]
    where
        P: FnMut(&char) -> bool,
    {
        let n = self.content.iter().take_while(|c| predicate(c)).count();
        self.chop(n)
    }

    fn next_token(&mut self) -> Option<String> {
        self.trim_left();
        let first = *self.content.first()?;

        if first.is_alphabetic() {
            let word: String = self
                .chop_while(|c| c.is_alphabetic())
                .iter()
                .flat_map(|c| c.to_lowercase())
                .collect();
            return Some(self.stemmer.stem(&word).into_owned());
        }

        if first.is_numeric() {
            return Some(self.chop_while(|c| c.is_numeric()).iter().collect());
        }

        Some(self.chop(1).iter().collect())
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a string in one go.
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    Lexer::new(&chars).collect()
}
