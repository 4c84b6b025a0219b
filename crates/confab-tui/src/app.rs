//! Application state for the confab TUI.
//!
//! [`App`] owns the session, the input bar, and modal state. Key handling
//! returns an [`Effect`] when the caller needs to perform network I/O;
//! the app itself never touches the transport, which keeps every state
//! transition testable without a server.

use crate::event::Action;
use crate::ui::input::InputState;
use crate::ui::modal::Modal;
use confab_client::{
    export_transcript, ChatResponse, ClearResponse, PendingSend, PendingToken, Session,
    TransportError,
};
use std::path::PathBuf;

/// How many ticks a status-bar notification stays visible.
const NOTIFICATION_TICKS: usize = 16;

/// Network work requested by a state transition.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Post a chat message; the caller reports back with
    /// [`App::finish_chat`].
    Send(PendingSend),
    /// Post a history clear; the caller reports back with
    /// [`App::finish_clear`].
    Clear,
}

/// Top-level TUI state.
pub struct App {
    session: Session,
    input: InputState,
    /// Transcript scroll offset in lines up from the bottom.
    scroll: usize,
    tick: usize,
    should_quit: bool,
    modal: Option<Modal>,
    server_name: String,
    confirm_clear: bool,
    clear_in_flight: bool,
    notification: Option<String>,
    notification_ttl: usize,
    export_dir: PathBuf,
}

impl App {
    /// Create a new app against the named server.
    pub fn new(server_name: impl Into<String>, confirm_clear: bool, export_dir: PathBuf) -> Self {
        Self {
            session: Session::new(),
            input: InputState::new(),
            scroll: 0,
            tick: 0,
            should_quit: false,
            modal: None,
            server_name: server_name.into(),
            confirm_clear,
            clear_in_flight: false,
            notification: None,
            notification_ttl: 0,
            export_dir,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance animations and expire notifications.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Submit the input bar content as a chat message.
    ///
    /// Blank input is a no-op that leaves the bar untouched; otherwise the
    /// bar is cleared and a send effect is returned.
    pub fn submit_input(&mut self) -> Option<Effect> {
        if self.input.content().trim().is_empty() {
            return None;
        }
        let text = self.input.submit();
        let pending = self.session.begin_send(&text)?;
        self.scroll = 0;
        Some(Effect::Send(pending))
    }

    /// Fill the input bar with sample query `index` and submit it.
    pub fn use_sample(&mut self, index: usize) -> Option<Effect> {
        let sample = Session::sample_queries().get(index)?;
        self.input.clear();
        self.input.insert_str(sample);
        self.submit_input()
    }

    /// Handle a non-editing action.
    pub fn handle_action(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Quit => {
                if self.modal.take().is_none() {
                    self.should_quit = true;
                }
                None
            }
            Action::ClearHistory | Action::NewChat => self.request_clear(),
            Action::Export => {
                self.export();
                None
            }
            Action::Sample(index) => self.use_sample(index),
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_add(3);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_sub(3);
                None
            }
            Action::None => None,
        }
    }

    /// Ask to clear history, confirming first when configured.
    fn request_clear(&mut self) -> Option<Effect> {
        if self.clear_in_flight {
            return None;
        }
        if self.confirm_clear {
            self.modal = Some(Modal::ConfirmClear);
            None
        } else {
            self.clear_in_flight = true;
            Some(Effect::Clear)
        }
    }

    /// Confirm the open modal (Enter).
    pub fn modal_confirm(&mut self) -> Option<Effect> {
        match self.modal.take() {
            Some(Modal::ConfirmClear) => {
                self.clear_in_flight = true;
                Some(Effect::Clear)
            }
            Some(Modal::Alert(_)) | None => None,
        }
    }

    /// Dismiss the open modal (Esc).
    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    /// Record the outcome of a chat request.
    pub fn finish_chat(&mut self, token: &PendingToken, result: Result<ChatResponse, TransportError>) {
        self.session.finish_send(token, result);
        self.scroll = 0;
    }

    /// Record the outcome of a clear request.
    ///
    /// A response with a falsy success flag is a silent no-op; only a
    /// transport failure raises the blocking alert.
    pub fn finish_clear(&mut self, result: Result<ClearResponse, TransportError>) {
        self.clear_in_flight = false;
        match result {
            Ok(response) => {
                if self.session.apply_clear(&response) {
                    self.scroll = 0;
                    self.notify("Conversation history cleared!");
                }
            }
            Err(e) => {
                self.modal = Some(Modal::Alert(format!("Error clearing history: {e}")));
            }
        }
    }

    /// Write the transcript to the export directory.
    fn export(&mut self) {
        match export_transcript(&self.session, &self.export_dir) {
            Ok(path) => self.notify(format!("Saved {}", path.display())),
            Err(e) => {
                self.modal = Some(Modal::Alert(format!("Error exporting transcript: {e}")));
            }
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = NOTIFICATION_TICKS;
    }
}
