//! Main application loop and event handling.

use crate::state::{AppMode, AppState, FocusTarget};
use crate::ui;
use crate::worker::{start_worker, WorkerCommand, WorkerEvent};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quarry_client::{RenderPolicy, SearchClient, SearchSession};
use quarry_core::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

type Session = Arc<SearchSession<SearchClient>>;

/// Run the TUI application.
///
/// Returns the link of the result chosen with Enter, if any.
pub fn run(config: &Config) -> Result<Option<String>> {
    let client = SearchClient::from_config(&config.client)?;
    let mut app = AppState::new(client.base_url());
    let session: Session = Arc::new(SearchSession::new(
        client,
        RenderPolicy::RankedList {
            limit: config.client.limit,
        },
    ));

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    let worker = start_worker(Arc::clone(&session), cmd_rx, evt_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &session, &cmd_tx, &evt_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = cmd_tx.send(WorkerCommand::Quit);
    if worker.join().is_err() {
        tracing::warn!("Search worker panicked");
    }

    res?;
    Ok(app.print_on_exit.take())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    session: &Session,
    cmd_tx: &Sender<WorkerCommand>,
    evt_rx: &Receiver<WorkerEvent>,
) -> Result<()> {
    loop {
        while let Ok(evt) = evt_rx.try_recv() {
            match evt {
                WorkerEvent::SearchResults { ticket, result } => {
                    app.apply_results(session, ticket, result);
                }
                WorkerEvent::Status { status } => app.server_status = status,
            }
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, session, cmd_tx, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Send the current query to the worker under a fresh ticket.
fn submit(app: &mut AppState, session: &Session, cmd_tx: &Sender<WorkerCommand>) {
    let ticket = session.issue();
    app.begin_search(ticket);
    let query = app.search.query.clone();
    if cmd_tx.send(WorkerCommand::Search { ticket, query }).is_err() {
        app.search.in_flight = None;
        app.error = Some("search worker stopped".to_string());
    }
}

fn handle_key_event(
    app: &mut AppState,
    session: &Session,
    cmd_tx: &Sender<WorkerCommand>,
    key: KeyCode,
    modifiers: KeyModifiers,
) {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key, modifiers) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Help => {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                app.toggle_help();
            }
        }
        AppMode::Search => handle_search_keys(app, session, cmd_tx, key, modifiers),
    }
}

fn handle_search_keys(
    app: &mut AppState,
    session: &Session,
    cmd_tx: &Sender<WorkerCommand>,
    key: KeyCode,
    modifiers: KeyModifiers,
) {
    match (key, modifiers) {
        (KeyCode::Char('?'), KeyModifiers::NONE) if !app.search.is_input_focused() => {
            app.toggle_help();
            return;
        }
        (KeyCode::Tab, KeyModifiers::NONE) => {
            app.search.toggle_focus();
            return;
        }
        (KeyCode::Esc, KeyModifiers::NONE) => {
            if app.search.is_results_focused() {
                app.search.focus = FocusTarget::Input;
            } else {
                app.search.clear_query();
            }
            return;
        }
        _ => {}
    }

    if app.search.is_input_focused() {
        match (key, modifiers) {
            (KeyCode::Enter, _) => submit(app, session, cmd_tx),
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                app.search.insert_char(c);
            }
            (KeyCode::Backspace, _) => app.search.delete_char(),
            (KeyCode::Left, _) => app.search.move_cursor_left(),
            (KeyCode::Right, _) => app.search.move_cursor_right(),
            (KeyCode::Down, _) if !app.search.rows.is_empty() => {
                app.search.focus = FocusTarget::Results;
            }
            _ => {}
        }
    } else {
        match (key, modifiers) {
            (KeyCode::Up, _) if app.search.selected_index == 0 => {
                app.search.focus = FocusTarget::Input;
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                app.search.select_next();
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                app.search.select_previous();
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => app.search.select_first(),
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => app.search.select_last(),
            (KeyCode::Enter, _) => {
                if let Some(link) = app.selected_link() {
                    app.print_on_exit = Some(link);
                    app.quit();
                }
            }
            (KeyCode::Char('q'), KeyModifiers::NONE) => app.quit(),
            _ => {}
        }
    }
}
