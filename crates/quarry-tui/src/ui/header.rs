//! Header rendering.

use crate::state::AppState;
use crate::ui;
use quarry_core::build_info::BUILD_INFO;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let sep = Span::styled(" | ", Style::default().fg(ui::TEXT_MUTED));

    let (server_text, server_color, docs_text, indexing) = match &app.server_status {
        Some(status) => (
            "server  ok".to_string(),
            if status.indexing {
                ui::WARNING
            } else {
                ui::SUCCESS
            },
            format!("docs  {}", format_count(status.documents)),
            status.indexing,
        ),
        None => (
            "server  offline".to_string(),
            ui::ERROR,
            "docs  ?".to_string(),
            false,
        ),
    };

    let mut spans = vec![
        Span::styled(
            "quarry",
            Style::default()
                .fg(ui::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(app.server_url.as_str(), Style::default().fg(ui::ACCENT)),
        sep.clone(),
        Span::styled("● ", Style::default().fg(server_color)),
        Span::styled(server_text, Style::default().fg(server_color)),
        sep,
        Span::styled("≡ ", Style::default().fg(ui::INFO)),
        Span::styled(docs_text, Style::default().fg(ui::INFO)),
    ];

    if indexing {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "indexing…",
            Style::default()
                .fg(ui::WARNING)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let build_info = compact_build_info();
    let build_width = (build_info.len() as u16).min(area.width.saturating_sub(2));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui::BORDER_DIM))
        .style(Style::default().bg(ui::BG_SURFACE));
    let inner = block.inner(area);

    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(build_width)])
        .split(inner);

    let left = Paragraph::new(Line::from(spans));
    let right = Paragraph::new(build_info)
        .style(
            Style::default()
                .fg(ui::TEXT_MUTED)
                .add_modifier(Modifier::DIM),
        )
        .alignment(Alignment::Right);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn format_count(n: usize) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (count, ch) in s.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

fn compact_build_info() -> String {
    let mut out = format!("v{}", BUILD_INFO.version);
    if BUILD_INFO.git_sha != "unknown" {
        out.push('@');
        out.extend(BUILD_INFO.git_sha.chars().take(7));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn compact_build_info_starts_with_version() {
        assert!(compact_build_info().starts_with(&format!("v{}", BUILD_INFO.version)));
    }
}
