//! Transport events.

use std::fmt;

/// Identifier of one connection attempt.
///
/// Assigned by [`crate::TransportSession::open`], strictly increasing per
/// session object. Every event a connector emits carries the id of the
/// connection that produced it, so events from a superseded connection can be
/// told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Events a connector reports back to its owner.
///
/// The owner feeds these into [`crate::ChatController::handle`] one at a time,
/// in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established; frames may now be sent.
    Open {
        /// Connection that opened.
        session: SessionId,
    },

    /// One text frame received, exactly as it arrived.
    Message {
        /// Connection the frame arrived on.
        session: SessionId,
        /// Raw frame text.
        frame: String,
    },

    /// Connection closed: failed to open, dropped, closed by the relay, or
    /// confirmation of a local close.
    Close {
        /// Connection that closed.
        session: SessionId,
    },
}

impl TransportEvent {
    /// Connection this event belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Self::Open { session } | Self::Message { session, .. } | Self::Close { session } => {
                *session
            },
        }
    }
}

/// A transport event accepted for the current connection.
///
/// Produced by [`crate::TransportSession::accept`] once the session id and
/// lifecycle state have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Open confirmation.
    Opened,
    /// Inbound frame.
    Frame(String),
    /// Close confirmation or remote closure.
    Closed,
}
