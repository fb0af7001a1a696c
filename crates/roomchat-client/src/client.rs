//! Chat controller state machine.
//!
//! The [`ChatController`] is the single owner of the connection. It exposes
//! three user operations ([`join_room`](ChatController::join_room),
//! [`send_message`](ChatController::send_message),
//! [`leave_room`](ChatController::leave_room)) and one event entry point
//! ([`handle`](ChatController::handle)) for everything the connector reports.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐ join_room ┌────────────┐  Open / join frame  ┌────────┐
//! │ Idle │──────────>│ Connecting │────────────────────>│ Joined │
//! └──────┘           └────────────┘                     └────────┘
//!    ^                     │ Close / leave_room              │ Close / leave_room
//!    └─────────────────────┴─────────────────────────────────┘
//! ```
//!
//! The message log only grows through inbound frames (plus the optional
//! departure notice). Outbound chat lines are not echoed locally; they show up
//! when the relay delivers them back.

use roomchat_proto::{Message, OutboundFrame};
use tracing::{debug, info, warn};

use crate::{
    config::ControllerConfig,
    error::{ClientError, ValidationError},
    event::{SessionEvent, TransportEvent},
    session::{Connector, TransportSession, TransportState},
};

/// Who we are in the room. Fixed from `join_room` until the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Display name, exactly as given.
    pub username: String,
    /// Room id, exactly as given.
    pub room_id: String,
}

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No connection.
    Idle,
    /// Connection requested, waiting for open confirmation.
    Connecting(Identity),
    /// Join frame sent; chat is possible.
    Joined(Identity),
}

impl SessionState {
    /// Identity of the live session. `None` when idle.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Idle => None,
            Self::Connecting(identity) | Self::Joined(identity) => Some(identity),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting(_) => "connecting",
            Self::Joined(_) => "joined",
        }
    }
}

/// Single-room chat session.
pub struct ChatController<C: Connector> {
    config: ControllerConfig,
    transport: TransportSession<C>,
    state: SessionState,
    messages: Vec<Message>,
}

impl<C: Connector> ChatController<C> {
    /// Create an idle controller.
    pub fn new(config: ControllerConfig, connector: C) -> Self {
        Self {
            config,
            transport: TransportSession::new(connector),
            state: SessionState::Idle,
            messages: Vec::new(),
        }
    }

    /// Join `room_id` as `username`.
    ///
    /// Opens the connection; the join frame goes out once the connector
    /// confirms the open. Calling this while a session is connecting or joined
    /// does nothing. Blank checks ignore surrounding whitespace, but the
    /// identity is used as given.
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyUsername` / `EmptyRoomId` for blank input
    /// - `ClientError::Transport` if the transport refuses to open
    pub fn join_room(&mut self, username: &str, room_id: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }
        if room_id.trim().is_empty() {
            return Err(ValidationError::EmptyRoomId.into());
        }

        if self.state != SessionState::Idle {
            debug!(state = self.state.name(), "join ignored: session already live");
            return Ok(());
        }

        let session = self.transport.open(&self.config.endpoint)?;
        self.messages.clear();
        self.state = SessionState::Connecting(Identity {
            username: username.to_owned(),
            room_id: room_id.to_owned(),
        });

        info!(%session, username, room_id, endpoint = %self.config.endpoint, "joining room");
        Ok(())
    }

    /// Post `text` to the room.
    ///
    /// Does nothing unless joined. The line is not added to the log here; it
    /// appears when the relay echoes it.
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyMessage` for blank text
    /// - `ClientError::Transport` if the frame cannot be handed off
    pub fn send_message(&mut self, text: &str) -> Result<(), ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let SessionState::Joined(identity) = &self.state else {
            debug!(state = self.state.name(), "send ignored: not joined");
            return Ok(());
        };

        let room_id = self.config.include_room_in_chat.then(|| identity.room_id.clone());
        let frame = OutboundFrame::chat(identity.username.as_str(), text, room_id);
        self.send_frame(&frame)
    }

    /// Leave the room and drop the connection.
    ///
    /// Sends a `leave` frame first when configured to. Clears the message log.
    /// A pending connection attempt is aborted the same way. Does nothing when
    /// idle.
    pub fn leave_room(&mut self) {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Joined(identity) => {
                if self.config.send_leave_frame {
                    let frame = OutboundFrame::leave(identity.username.as_str(), identity.room_id.as_str());
                    if let Err(e) = self.send_frame(&frame) {
                        warn!(error = %e, "failed to send leave frame");
                    }
                }
                info!(username = %identity.username, room_id = %identity.room_id, "left room");
            },
            SessionState::Connecting(identity) => {
                info!(room_id = %identity.room_id, "connection attempt aborted");
            },
            SessionState::Idle => {
                debug!("leave ignored: not in a room");
                return;
            },
        }

        self.transport.close();
        self.messages.clear();
    }

    /// Process one event reported by the connector.
    ///
    /// Stale and out-of-order events are ignored.
    ///
    /// # Errors
    ///
    /// - `ClientError::Protocol` if an inbound frame is malformed; the frame
    ///   is dropped and the session continues
    /// - `ClientError::Transport` if the join frame cannot be sent after the
    ///   open confirmation; the session is closed
    pub fn handle(&mut self, event: TransportEvent) -> Result<(), ClientError> {
        let Some(event) = self.transport.accept(event) else {
            return Ok(());
        };

        match event {
            SessionEvent::Opened => self.handle_open(),
            SessionEvent::Frame(raw) => self.handle_frame(&raw),
            SessionEvent::Closed => {
                self.handle_close();
                Ok(())
            },
        }
    }

    /// True once the join frame has gone out and until the session ends.
    pub fn is_joined(&self) -> bool {
        matches!(self.state, SessionState::Joined(_))
    }

    /// Message log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Identity of the live session. `None` when idle.
    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    /// Configuration in use.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Lifecycle state of the underlying connection.
    pub fn transport_state(&self) -> TransportState {
        self.transport.state()
    }

    /// The underlying transport session.
    pub fn transport(&self) -> &TransportSession<C> {
        &self.transport
    }

    /// The underlying connector, mutably.
    pub fn connector_mut(&mut self) -> &mut C {
        self.transport.connector_mut()
    }

    fn handle_open(&mut self) -> Result<(), ClientError> {
        let identity = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Connecting(identity) => identity,
            other => {
                debug!(state = other.name(), "open confirmation outside connecting");
                self.state = other;
                return Ok(());
            },
        };

        let frame = OutboundFrame::join(identity.room_id.as_str(), identity.username.as_str());
        if let Err(e) = self.send_frame(&frame) {
            warn!(error = %e, "failed to send join frame, closing");
            self.transport.close();
            return Err(e);
        }

        info!(username = %identity.username, room_id = %identity.room_id, "joined room");
        self.state = SessionState::Joined(identity);
        Ok(())
    }

    fn handle_frame(&mut self, raw: &str) -> Result<(), ClientError> {
        match Message::decode(raw) {
            Ok(message) => {
                self.messages.push(message);
                Ok(())
            },
            Err(e) => {
                warn!(error = %e, len = raw.len(), "dropping malformed frame");
                Err(e.into())
            },
        }
    }

    fn handle_close(&mut self) {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Joined(identity) => {
                info!(room_id = %identity.room_id, "connection closed by relay");
                if self.config.append_departure_notice {
                    self.messages
                        .push(Message::system(format!("{} has left the room.", identity.username)));
                }
            },
            SessionState::Connecting(identity) => {
                warn!(room_id = %identity.room_id, endpoint = %self.config.endpoint, "connection failed");
            },
            SessionState::Idle => {},
        }
    }

    fn send_frame(&mut self, frame: &OutboundFrame) -> Result<(), ClientError> {
        let raw = frame.encode()?;
        self.transport.send(raw)?;
        debug!(kind = frame.kind(), "frame sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity { username: "alice".into(), room_id: "red".into() }
    }

    #[test]
    fn state_identity() {
        assert_eq!(SessionState::Idle.identity(), None);
        assert_eq!(SessionState::Connecting(identity()).identity(), Some(&identity()));
        assert_eq!(SessionState::Joined(identity()).identity(), Some(&identity()));
    }

    #[test]
    fn state_names() {
        assert_eq!(SessionState::Idle.name(), "idle");
        assert_eq!(SessionState::Connecting(identity()).name(), "connecting");
        assert_eq!(SessionState::Joined(identity()).name(), "joined");
    }
}
