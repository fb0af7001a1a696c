//! Client error types.
//!
//! Three layers: validation of user input, protocol failures from the wire
//! codec, and transport misuse or failure. None of them is fatal; the
//! controller always ends up in a state from which the user can retry.

use roomchat_proto::ProtocolError;
use thiserror::Error;

use crate::session::TransportState;

/// User input rejected before any state change.
///
/// Display strings are meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Username empty after trimming.
    #[error("Please enter a username!")]
    EmptyUsername,

    /// Room id empty after trimming.
    #[error("Please enter a room ID!")]
    EmptyRoomId,

    /// Chat text empty after trimming.
    #[error("Message is empty")]
    EmptyMessage,
}

/// Transport failures and invalid transport usage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// `open` called while a connection is connecting or open.
    #[error("connection already active (state {state:?})")]
    AlreadyOpen {
        /// State when the call was made
        state: TransportState,
    },

    /// `send` called while the connection is not open.
    #[error("connection not open (state {state:?})")]
    NotOpen {
        /// State when the call was made
        state: TransportState,
    },

    /// Connector failed to hand off a frame.
    #[error("send failed: {0}")]
    Send(String),
}

/// Errors returned by [`crate::ChatController`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Invalid user input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed frame, inbound or outbound.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Returns true if the error should be presented to the user rather than
    /// just logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
