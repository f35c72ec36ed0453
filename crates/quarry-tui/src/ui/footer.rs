//! Footer / status bar rendering.

use crate::state::AppState;
use crate::ui;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let results_focused = app.search.is_results_focused();

    let mut hints = vec![
        ("Enter", if results_focused { "open" } else { "search" }),
        ("Tab", "focus"),
    ];
    if results_focused {
        hints.extend([("j/k", "move"), ("?", "help")]);
    }
    hints.extend([("Esc", "clear"), ("Ctrl-C", "quit")]);

    let mut spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("{key}:"), Style::default().fg(ui::PRIMARY)),
                Span::styled(
                    format!(" {action}  "),
                    Style::default().fg(ui::TEXT_SECONDARY),
                ),
            ]
        })
        .collect();

    if let Some(msg) = &app.error {
        spans.push(Span::styled(
            msg.as_str(),
            Style::default().fg(ui::ERROR).add_modifier(Modifier::BOLD),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(ui::BG_SURFACE));
    f.render_widget(footer, area);
}
