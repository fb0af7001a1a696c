//! Async runtime
//!
//! Event loop that drives terminal I/O and feeds the App state machine. Uses
//! `tokio::select!` to handle terminal events and connector events
//! concurrently on one task, so the controller never needs locking.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use roomchat_client::{
    ChatController, ControllerConfig, TransportEvent, TransportState,
    transport::{CLOSE_TIMEOUT, WsConnector},
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{App, AppAction, AppEvent, KeyInput, ui};

/// How long quitting waits for a leave to be flushed and confirmed.
const SHUTDOWN_GRACE: Duration = CLOSE_TIMEOUT.saturating_add(Duration::from_millis(500));

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown and the main event loop. Owns the App and
/// the receiving end of the connector's event channel.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App<WsConnector>,
    transport_events: mpsc::UnboundedReceiver<TransportEvent>,
}

impl Runtime {
    /// Set up the terminal and an idle controller.
    ///
    /// `username` and `room` prefill the join form.
    pub fn new(config: ControllerConfig, username: &str, room: &str) -> Result<Self, RuntimeError> {
        let (connector, transport_events) = WsConnector::new();
        let app = App::new(ChatController::new(config, connector), username, room);

        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, app, transport_events })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;

        let mut event_stream = EventStream::new();

        loop {
            let actions = tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match app_event(event) {
                            Some(event) => self.app.handle(event),
                            None => continue,
                        },
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => break,
                    }
                }

                // Connector events
                Some(event) = self.transport_events.recv() => {
                    self.app.handle(AppEvent::Transport(event))
                }
            };

            if self.process_actions(actions)? {
                break;
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Execute actions. Returns true if the app should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Leave the room and give the connection a moment to flush the leave
    /// frame and close.
    async fn shutdown(&mut self) {
        let Self { app, transport_events, .. } = self;
        if !app.shutdown() {
            return;
        }

        let closed = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(event) = transport_events.recv().await {
                app.handle(AppEvent::Transport(event));
                if app.controller().transport_state() == TransportState::Closed {
                    break;
                }
            }
        })
        .await;

        match closed {
            Ok(()) => info!("connection closed"),
            Err(_) => warn!("connection did not close in time"),
        }
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.app);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Convert a crossterm event. `None` for events the App does not care about.
fn app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_input(key).map(AppEvent::Key),
        Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
        _ => None,
    }
}

/// Convert a crossterm key press to [`KeyInput`].
fn key_input(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char(c) => Some(KeyInput::Ctrl(c.to_ascii_lowercase())),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn plain_keys_convert() {
        assert_eq!(
            app_event(press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::Char('a')))
        );
        assert_eq!(
            app_event(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(AppEvent::Key(KeyInput::Char('A')))
        );
        assert_eq!(
            app_event(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::Enter))
        );
    }

    #[test]
    fn ctrl_chords_convert() {
        assert_eq!(
            app_event(press(KeyCode::Char('L'), KeyModifiers::CONTROL)),
            Some(AppEvent::Key(KeyInput::Ctrl('l')))
        );
        assert_eq!(app_event(press(KeyCode::Enter, KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn releases_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(app_event(Event::Key(key)), None);
    }

    #[test]
    fn resize_converts() {
        assert_eq!(app_event(Event::Resize(100, 40)), Some(AppEvent::Resize(100, 40)));
    }
}
