//! confab-tui: terminal UI for the confab chat client
//!
//! This crate provides the interactive chat screen: a scrollable
//! transcript, a multi-line input bar, a clear-history confirmation
//! modal, and a status bar with the server-side message counter and
//! search indicator. Network calls run as background tasks so the UI
//! stays responsive while the server searches.

mod app;
mod event;
pub mod ui;

pub use app::{App, Effect};
pub use event::{Action, Event, EventHandler};

use confab_client::{
    ChatResponse, ClearResponse, Config, HttpTransport, PendingToken, Transport, TransportError,
};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat TUI against the configured server.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(HttpTransport::new(&config.server_url)?);

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut app = App::new(&config.server_url, config.confirm_clear, export_dir);

    // 4 Hz tick rate drives the spinner and typing indicator
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, transport).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

type ChatHandle = tokio::task::JoinHandle<(PendingToken, Result<ChatResponse, TransportError>)>;
type ClearHandle = tokio::task::JoinHandle<Result<ClearResponse, TransportError>>;

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    transport: Arc<HttpTransport>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chat_handles: Vec<ChatHandle> = Vec::new();
    let mut clear_handles: Vec<ClearHandle> = Vec::new();

    loop {
        terminal.draw(|frame| ui::draw(app, frame))?;

        // Harvest completed chat requests (non-blocking)
        let mut completed = Vec::new();
        for (i, handle) in chat_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            if let Ok((token, result)) = chat_handles.remove(i).await {
                app.finish_chat(&token, result);
            }
        }

        // Harvest completed clear requests
        let mut completed = Vec::new();
        for (i, handle) in clear_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            if let Ok(result) = clear_handles.remove(i).await {
                app.finish_clear(result);
            }
        }

        if let Some(event) = events.next().await {
            let effect = match event {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                        MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                        _ => None,
                    }
                }
                Event::Tick => {
                    app.on_tick();
                    None
                }
                Event::Resize(_, _) => None,
            };

            match effect {
                Some(Effect::Send(pending)) => {
                    let transport = Arc::clone(&transport);
                    chat_handles.push(tokio::spawn(async move {
                        let result = transport.chat(&pending.message).await;
                        (pending.token, result)
                    }));
                }
                Some(Effect::Clear) => {
                    let transport = Arc::clone(&transport);
                    clear_handles.push(tokio::spawn(async move { transport.clear().await }));
                }
                None => {}
            }
        }

        if app.should_quit() {
            for handle in chat_handles {
                handle.abort();
            }
            for handle in clear_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Route a key event through the modal, the input bar, and the action map.
fn handle_key(app: &mut App, key: crossterm::event::KeyEvent) -> Option<Effect> {
    use crossterm::event::{KeyCode, KeyModifiers};

    // An open modal captures everything
    if app.modal().is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('y') => app.modal_confirm(),
            _ => {
                app.dismiss_modal();
                None
            }
        };
    }

    // Shift+Enter (or Ctrl+Enter on terminals that cannot report Shift)
    // inserts a literal newline instead of submitting
    if key.code == KeyCode::Enter
        && (key.modifiers.contains(KeyModifiers::SHIFT)
            || key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.input_mut().insert('\n');
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return app.handle_action(event::key_to_action(key));
    }

    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Char(c) => {
            app.input_mut().insert(c);
            None
        }
        KeyCode::Backspace => {
            app.input_mut().backspace();
            None
        }
        KeyCode::Delete => {
            app.input_mut().delete();
            None
        }
        KeyCode::Left => {
            app.input_mut().move_left();
            None
        }
        KeyCode::Right => {
            app.input_mut().move_right();
            None
        }
        KeyCode::Home => {
            app.input_mut().move_home();
            None
        }
        KeyCode::End => {
            app.input_mut().move_end();
            None
        }
        // Up/Down recall submit history when the input is empty and
        // scroll the transcript otherwise
        KeyCode::Up => {
            if app.input().is_empty() {
                app.input_mut().history_prev();
                None
            } else {
                app.handle_action(Action::ScrollUp)
            }
        }
        KeyCode::Down => {
            if app.input().is_empty() {
                app.input_mut().history_next();
                None
            } else {
                app.handle_action(Action::ScrollDown)
            }
        }
        _ => app.handle_action(event::key_to_action(key)),
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
