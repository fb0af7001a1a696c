//! Outbound frames.
//!
//! The client sends exactly three frame shapes. Field order inside each
//! payload is fixed by the payload struct declaration, so encoded frames are
//! stable byte-for-byte.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{ProtocolError, Result},
    payloads::{ChatPayload, JoinPayload, LeavePayload},
};

/// A frame sent from client to relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum OutboundFrame {
    /// Announce membership. First frame of every session.
    Join(JoinPayload),
    /// Post a line to the room.
    Chat(ChatPayload),
    /// Announce departure before closing the connection.
    Leave(LeavePayload),
}

impl OutboundFrame {
    /// `join` frame.
    pub fn join(room_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::Join(JoinPayload { room_id: room_id.into(), username: username.into() })
    }

    /// `chat` frame. `room_id` is omitted from the payload when `None`.
    pub fn chat(
        username: impl Into<String>,
        message: impl Into<String>,
        room_id: Option<String>,
    ) -> Self {
        Self::Chat(ChatPayload { username: username.into(), message: message.into(), room_id })
    }

    /// `leave` frame.
    pub fn leave(username: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self::Leave(LeavePayload { username: username.into(), room_id: room_id.into() })
    }

    /// Wire tag of this frame.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::Chat(_) => "chat",
            Self::Leave(_) => "leave",
        }
    }

    /// Serialize to a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }

    /// Parse a client frame. Used by relays and tests.
    ///
    /// # Errors
    ///
    /// Same error classification as [`crate::Message::decode`], but payloads
    /// must match the frame's shape exactly.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::from_decode(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_wire_format() {
        let frame = OutboundFrame::join("red", "alice").encode().unwrap();
        insta::assert_snapshot!(frame, @r#"{"type":"join","payload":{"roomId":"red","username":"alice"}}"#);
    }

    #[test]
    fn chat_wire_format_with_room() {
        let frame = OutboundFrame::chat("alice", "hello", Some("red".into())).encode().unwrap();
        insta::assert_snapshot!(frame, @r#"{"type":"chat","payload":{"username":"alice","message":"hello","roomId":"red"}}"#);
    }

    #[test]
    fn chat_wire_format_without_room() {
        let frame = OutboundFrame::chat("alice", "hello", None).encode().unwrap();
        insta::assert_snapshot!(frame, @r#"{"type":"chat","payload":{"username":"alice","message":"hello"}}"#);
    }

    #[test]
    fn leave_wire_format() {
        let frame = OutboundFrame::leave("alice", "red").encode().unwrap();
        insta::assert_snapshot!(frame, @r#"{"type":"leave","payload":{"username":"alice","roomId":"red"}}"#);
    }

    #[test]
    fn kind_matches_wire_tag() {
        for frame in [
            OutboundFrame::join("r", "u"),
            OutboundFrame::chat("u", "m", None),
            OutboundFrame::leave("u", "r"),
        ] {
            let encoded = frame.encode().unwrap();
            assert!(encoded.starts_with(&format!(r#"{{"type":"{}""#, frame.kind())));
        }
    }
}
