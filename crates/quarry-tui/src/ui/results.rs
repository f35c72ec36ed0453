//! Results list rendering.

use crate::state::AppState;
use crate::ui;
use quarry_client::Row;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = &app.search.rows;

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(row_line(row))).collect();

    let border_style = if app.search.is_results_focused() {
        Style::default().fg(ui::BORDER_FOCUS)
    } else {
        Style::default().fg(ui::BORDER_DIM)
    };

    let title = if app.search.is_searching() {
        format!(" Results ({})  searching… ", rows.len())
    } else {
        format!(" Results ({}) ", rows.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .style(Style::default().bg(ui::BG_SURFACE))
        .highlight_style(Style::default().bg(ui::BG_ELEVATED))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.search.selected_index));
    }

    f.render_stateful_widget(list, area, &mut state);
}

fn row_line(row: &Row) -> Line<'_> {
    match row {
        Row::Ranked(row) => Line::from(vec![
            Span::styled(
                row.label.as_str(),
                Style::default()
                    .fg(ui::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(row.score.as_str(), Style::default().fg(ui::SUCCESS)),
            Span::raw("  "),
            Span::styled(
                row.href.as_str(),
                Style::default()
                    .fg(ui::ACCENT)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Row::Pair(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(ui::TEXT_PRIMARY),
        )),
    }
}
