//! UI components and rendering.

pub mod footer;
pub mod header;
pub mod results;
pub mod search_input;
pub mod theme;

pub use theme::*;

use crate::state::{AppMode, AppState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw one frame.
pub fn render(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    search_input::render(f, chunks[1], app);
    results::render(f, chunks[2], app);
    footer::render(f, chunks[3], app);

    if app.mode == AppMode::Help {
        render_help(f);
    }
}

fn render_help(f: &mut Frame) {
    let help_text = [
        "quarry - search your documents",
        "",
        "Search:",
        "  Enter         Submit the query",
        "  Esc           Clear the query",
        "  Tab / ↓       Move to results",
        "",
        "Results:",
        "  j / ↓         Move down",
        "  k / ↑         Move up",
        "  g / G         Jump to top / bottom",
        "  Enter         Quit and print the link",
        "  Esc           Back to input",
        "",
        "Ctrl-c quits. Press Esc to close this help.",
    ];

    let help = Paragraph::new(help_text.join("\n"))
        .style(Style::default().fg(TEXT_PRIMARY).bg(BG_DARK))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(PRIMARY))
                .title(" Help "),
        );

    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
