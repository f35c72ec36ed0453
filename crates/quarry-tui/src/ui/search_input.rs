//! Search input rendering.

use crate::state::AppState;
use crate::ui;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PROMPT: &str = "Query: ";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let is_focused = app.search.is_input_focused();

    let border_style = if is_focused {
        Style::default().fg(ui::BORDER_FOCUS)
    } else {
        Style::default().fg(ui::BORDER_DIM)
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(ui::ACCENT)),
        Span::styled(&app.search.query, Style::default().fg(ui::TEXT_PRIMARY)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Enter to search ")
            .style(if is_focused {
                Style::default().bg(ui::BG_ELEVATED)
            } else {
                Style::default().bg(ui::BG_SURFACE)
            }),
    );

    f.render_widget(input, area);

    if is_focused {
        // 1 for the border, then the prompt, then the cursor.
        let offset = PROMPT.len() + app.search.cursor_position;
        let cursor_x = area.x + 1 + offset as u16;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}
