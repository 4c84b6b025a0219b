//! Event handling for the confab TUI.
//!
//! Terminal input is read on a dedicated thread (crossterm's reads
//! block); animation ticks come from a tokio interval on the async side,
//! so the tick cadence holds steady even while input arrives in bursts.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// How long the input thread waits per poll before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates (spinner, typing indicator).
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Merges terminal input with a steady animation tick.
pub struct EventHandler {
    input: mpsc::UnboundedReceiver<Event>,
    ticker: Interval,
}

impl EventHandler {
    /// Create an event handler ticking every `tick_rate_ms` milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, input) = mpsc::unbounded_channel();
        std::thread::spawn(move || forward_input(&tx));

        let mut ticker = interval(Duration::from_millis(tick_rate_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self { input, ticker }
    }

    /// Get the next event, blocking until one is available.
    ///
    /// Returns `None` once the input thread has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        tokio::select! {
            event = self.input.recv() => event,
            _ = self.ticker.tick() => Some(Event::Tick),
        }
    }
}

/// Input-thread loop: forward terminal events until the receiver drops
/// or the terminal goes away.
fn forward_input(tx: &mpsc::UnboundedSender<Event>) {
    loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => {
                if tx.is_closed() {
                    return;
                }
                continue;
            }
            Err(_) => return,
        }

        let event = match event::read() {
            Ok(CrosstermEvent::Key(key)) => Event::Key(key),
            Ok(CrosstermEvent::Mouse(mouse)) => Event::Mouse(mouse),
            Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
            Ok(_) => continue,
            Err(_) => return,
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// Actions the user can trigger outside of plain text editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ClearHistory,
    NewChat,
    Export,
    Sample(usize),
    ScrollUp,
    ScrollDown,
    None,
}

/// Convert a key event to an action.
///
/// Plain characters and editing keys are handled by the input bar before
/// this mapping applies; only chords and navigation keys land here.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('l') => Action::ClearHistory,
            KeyCode::Char('n') => Action::NewChat,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('1') => Action::Sample(0),
            KeyCode::Char('2') => Action::Sample(1),
            KeyCode::Char('3') => Action::Sample(2),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        _ => Action::None,
    }
}
