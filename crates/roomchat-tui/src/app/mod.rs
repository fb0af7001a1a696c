//! UI state machine
//!
//! Pure state machine that processes terminal and connector events, producing
//! actions for the runtime to execute. Completely decoupled from I/O.
//!
//! # Architecture
//!
//! The App wraps a [`ChatController`] and manages UI-specific state like the
//! join form, the message input line, the status line, and the terminal size.
//! It translates keys into controller operations and watches the controller's
//! state to decide which screen to show.
//!
//! ```text
//!  Join ──(controller Joined)──> Chat ──(/leave, Ctrl-L)──> Join
//! ```

mod action;
mod event;
mod state;

pub use action::AppAction;
pub use event::AppEvent;
use roomchat_client::{
    ChatController, ClientError, Connector, Identity, SessionState, TransportEvent,
    TransportState, ValidationError,
};
pub use state::{Field, Screen};
use tracing::debug;

use crate::input::{KeyInput, LineEditor};

/// Chat line that leaves the room.
pub const LEAVE_COMMAND: &str = "/leave";

/// UI state machine.
///
/// Manages UI state (form fields, input line, status) and delegates chat
/// operations to the wrapped controller. Pure and testable.
pub struct App<C: Connector> {
    controller: ChatController<C>,
    screen: Screen,
    focus: Field,
    username: LineEditor,
    room: LineEditor,
    message: LineEditor,
    /// Identity of the room shown on the chat screen. Outlives the session so
    /// the log stays readable after a remote close.
    chat_identity: Option<Identity>,
    /// Status line text. `None` shows the key hints.
    status: Option<String>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl<C: Connector> App<C> {
    /// Create an App on the join screen with the form prefilled.
    pub fn new(controller: ChatController<C>, username: &str, room: &str) -> Self {
        let focus = if username.is_empty() || !room.is_empty() { Field::Username } else { Field::Room };
        Self {
            controller,
            screen: Screen::Join,
            focus,
            username: LineEditor::with_text(username),
            room: LineEditor::with_text(room),
            message: LineEditor::new(),
            chat_identity: None,
            status: None,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions for the runtime.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Transport(event) => {
                self.handle_transport(event);
                vec![AppAction::Render]
            },
        }
    }

    /// Leave the room if a session is live, before quitting.
    ///
    /// Returns true if a close is in flight and its confirmation is worth
    /// waiting for.
    pub fn shutdown(&mut self) -> bool {
        self.controller.leave_room();
        self.controller.transport_state() == TransportState::Closing
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Ctrl('c') => return vec![AppAction::Quit],
            _ => {},
        }

        match self.screen {
            Screen::Join => self.handle_join_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
        vec![AppAction::Render]
    }

    fn handle_join_key(&mut self, key: KeyInput) {
        match key {
            KeyInput::Tab | KeyInput::Up | KeyInput::Down => self.focus = self.focus.toggle(),
            KeyInput::Enter => self.submit_join(),
            key => {
                let editor = match self.focus {
                    Field::Username => &mut self.username,
                    Field::Room => &mut self.room,
                };
                editor.edit(key);
            },
        }
    }

    fn handle_chat_key(&mut self, key: KeyInput) {
        match key {
            KeyInput::Ctrl('l') => self.leave(),
            KeyInput::Enter => self.submit_message(),
            key => {
                self.message.edit(key);
            },
        }
    }

    fn submit_join(&mut self) {
        match self.controller.join_room(self.username.text(), self.room.text()) {
            Ok(()) => {
                if let SessionState::Connecting(_) = self.controller.state() {
                    self.status = Some(format!("Connecting to {}...", self.controller.config().endpoint));
                }
            },
            Err(e) => {
                match e {
                    ClientError::Validation(ValidationError::EmptyUsername) => {
                        self.focus = Field::Username;
                    },
                    ClientError::Validation(ValidationError::EmptyRoomId) => {
                        self.focus = Field::Room;
                    },
                    _ => {},
                }
                self.status = Some(e.to_string());
            },
        }
    }

    fn submit_message(&mut self) {
        let text = self.message.take();

        if text.trim() == LEAVE_COMMAND {
            self.leave();
            return;
        }

        if !self.controller.is_joined() {
            // Keep the line so it is not lost
            self.message = LineEditor::with_text(text);
            self.status = Some(format!("Not connected. {LEAVE_COMMAND} to return."));
            return;
        }

        match self.controller.send_message(&text) {
            Ok(()) | Err(ClientError::Validation(_)) => {},
            Err(e) => self.status = Some(format!("Send failed: {e}")),
        }
    }

    fn leave(&mut self) {
        self.controller.leave_room();
        self.screen = Screen::Join;
        self.message.take();
        self.status =
            self.chat_identity.take().map(|identity| format!("Left room {}", identity.room_id));
    }

    fn handle_transport(&mut self, event: TransportEvent) {
        let was_connecting = matches!(self.controller.state(), SessionState::Connecting(_));
        let was_joined = self.controller.is_joined();

        let result = self.controller.handle(event);

        match (self.screen, self.controller.state()) {
            (Screen::Join, SessionState::Joined(identity)) => {
                self.chat_identity = Some(identity.clone());
                self.screen = Screen::Chat;
                self.status = None;
            },
            (Screen::Join, SessionState::Idle) if was_connecting => {
                self.status =
                    Some(format!("Could not connect to {}", self.controller.config().endpoint));
            },
            (Screen::Chat, SessionState::Idle) if was_joined => {
                self.status = Some(format!("Disconnected. {LEAVE_COMMAND} to return."));
            },
            _ => {},
        }

        match result {
            // Logged by the controller; nothing the user can do about it
            Ok(()) | Err(ClientError::Protocol(_)) => {},
            Err(e) => {
                debug!(error = %e, "transport event failed");
                self.status = Some(e.to_string());
            },
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &ChatController<C> {
        &self.controller
    }

    /// Screen to render.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Focused join form field.
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Username field.
    pub fn username(&self) -> &LineEditor {
        &self.username
    }

    /// Room id field.
    pub fn room(&self) -> &LineEditor {
        &self.room
    }

    /// Chat input line.
    pub fn message(&self) -> &LineEditor {
        &self.message
    }

    /// Identity shown on the chat screen. Kept after a remote close until the
    /// user leaves.
    pub fn chat_identity(&self) -> Option<&Identity> {
        self.chat_identity.as_ref()
    }

    /// Status message to display. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
