//! Turning search hits into display rows.
//!
//! Rendering is pure: [`render`] maps a policy and a hit list to rows, and the
//! caller hands those rows to whatever [`OutputContainer`] it holds.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use quarry_core::protocol::SearchHit;
use std::fmt;

/// Characters escaped in a link path. `/` stays literal so ids keep their
/// directory structure.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Number of rows the ranked list shows by default.
pub const DEFAULT_RANKED_LIMIT: usize = 10;

/// How hits are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    /// A link plus a score label per hit, at most `limit` rows.
    RankedList { limit: usize },
    /// One `<id> => <score>` line for every hit.
    KeyValue,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        RenderPolicy::RankedList {
            limit: DEFAULT_RANKED_LIMIT,
        }
    }
}

/// A ranked-list entry: a link to the document and its score label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub href: String,
    pub label: String,
    pub score: String,
}

/// One rendered line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Ranked(RankedRow),
    Pair(String),
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Ranked(row) => write!(f, "{}  {}", row.label, row.score),
            Row::Pair(text) => f.write_str(text),
        }
    }
}

/// Where rendered rows end up.
///
/// A successful search replaces the whole content; a failed one never calls
/// [`OutputContainer::replace`].
pub trait OutputContainer {
    fn replace(&mut self, rows: Vec<Row>);
}

impl OutputContainer for Vec<Row> {
    fn replace(&mut self, rows: Vec<Row>) {
        *self = rows;
    }
}

/// Render `hits` in response order according to `policy`.
pub fn render(policy: RenderPolicy, hits: &[SearchHit]) -> Vec<Row> {
    match policy {
        RenderPolicy::RankedList { limit } => hits
            .iter()
            .take(limit.min(hits.len()))
            .map(|hit| Row::Ranked(ranked_row(hit)))
            .collect(),
        RenderPolicy::KeyValue => hits
            .iter()
            .map(|hit| Row::Pair(format!("{} => {}", hit.id, hit.score)))
            .collect(),
    }
}

fn ranked_row(hit: &SearchHit) -> RankedRow {
    RankedRow {
        href: document_href(&hit.id),
        label: hit.id.clone(),
        score: format!("Score: {}", hit.score),
    }
}

/// Link target for a document id: percent-encoded, with exactly one leading
/// slash.
pub fn document_href(id: &str) -> String {
    format!("/{}", utf8_percent_encode(id.trim_start_matches('/'), PATH))
}
