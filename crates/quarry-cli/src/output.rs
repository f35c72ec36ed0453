//! Terminal rendering of search results and status.

use owo_colors::OwoColorize;
use quarry_client::{OutputContainer, Row};
use quarry_core::protocol::StatusReport;

/// Prints rendered rows to stdout as they are handed over.
pub struct TerminalOutput {
    base_url: String,
    color: bool,
}

impl TerminalOutput {
    pub fn new(base_url: &str, color: bool) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            color,
        }
    }

    fn line(&self, rank: usize, row: &Row) -> String {
        match row {
            Row::Ranked(row) => {
                let link = format!("{}{}", self.base_url, row.href);
                if self.color {
                    format!(
                        "{:>3}. {}  {}\n     {}",
                        rank,
                        row.label.bold().bright_white(),
                        row.score.bright_green(),
                        link.dimmed()
                    )
                } else {
                    format!("{:>3}. {}  {}\n     {}", rank, row.label, row.score, link)
                }
            }
            Row::Pair(text) => text.clone(),
        }
    }
}

impl OutputContainer for TerminalOutput {
    fn replace(&mut self, rows: Vec<Row>) {
        if rows.is_empty() {
            println!("No results.");
        }
        for (i, row) in rows.iter().enumerate() {
            println!("{}", self.line(i + 1, row));
        }
    }
}

pub fn print_status(server: &str, status: &StatusReport) {
    let last = if status.last_indexed > 0 {
        chrono::DateTime::from_timestamp(status.last_indexed, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default()
    } else {
        "never".to_string()
    };

    println!("Server: {server}");
    if !status.version.is_empty() {
        println!("  Version: {}", status.version);
    }
    println!("  Documents: {}", status.documents);
    println!("  Terms: {}", status.terms);
    println!(
        "  Indexing: {}",
        if status.indexing { "running" } else { "idle" }
    );
    println!("  Last indexed: {last}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_client::RankedRow;

    #[test]
    fn test_plain_ranked_line_includes_link() {
        let out = TerminalOutput::new("http://127.0.0.1:8000/", false);
        let row = Row::Ranked(RankedRow {
            href: "/docs/a.md".into(),
            label: "docs/a.md".into(),
            score: "Score: 0.5".into(),
        });

        assert_eq!(
            out.line(1, &row),
            "  1. docs/a.md  Score: 0.5\n     http://127.0.0.1:8000/docs/a.md"
        );
    }

    #[test]
    fn test_pair_line_is_verbatim() {
        let out = TerminalOutput::new("http://x", true);
        assert_eq!(out.line(4, &Row::Pair("k => 1".into())), "k => 1");
    }
}
