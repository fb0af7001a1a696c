//! Frame payloads and the inbound message union.
//!
//! Frames are adjacently tagged: the variant name lives in `type`, the body in
//! `payload`. Inbound frames are dispatched on the tag alone; payload fields
//! that are missing or of the wrong type are carried through as text rather
//! than rejected.

pub mod app;
pub mod room;

pub use app::{ChatPayload, SystemNotice};
pub use room::{JoinPayload, LeavePayload};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::errors::{ProtocolError, Result};

const INBOUND_TAGS: &[&str] = &["chat", "system"];

/// A message delivered by the relay.
///
/// This is also the element type of the client's message log, which includes
/// locally synthesized notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Message {
    /// A user-authored line.
    Chat(ChatPayload),
    /// A notification (joins, departures, relay notices).
    System(SystemNotice),
}

impl Message {
    /// Chat line without a room id.
    pub fn chat(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Chat(ChatPayload { username: username.into(), message: message.into(), room_id: None })
    }

    /// System notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self::System(SystemNotice { text: text.into() })
    }

    /// Decode one inbound text frame.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::MalformedJson`] if `raw` is not JSON
    /// - [`ProtocolError::InvalidFrame`] if the frame is not an object or its
    ///   `type` tag is missing or unknown
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::from_decode(&e))
    }

    /// Encode as a text frame, the way the relay would send it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }

    /// Chat body, if this is a chat line.
    pub fn as_chat(&self) -> Option<&ChatPayload> {
        match self {
            Self::Chat(chat) => Some(chat),
            Self::System(_) => None,
        }
    }

    /// Text shown for this entry.
    pub fn text(&self) -> &str {
        match self {
            Self::Chat(chat) => &chat.message,
            Self::System(notice) => &notice.text,
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut frame = Map::<String, Value>::deserialize(deserializer)?;
        let payload = frame.remove("payload").unwrap_or(Value::Null);

        match frame.remove("type") {
            Some(Value::String(tag)) => match tag.as_str() {
                "chat" => Ok(Self::Chat(ChatPayload::from_payload(payload))),
                "system" => Ok(Self::System(SystemNotice::from_payload(payload))),
                other => Err(de::Error::unknown_variant(other, INBOUND_TAGS)),
            },
            Some(other) => {
                Err(de::Error::custom(format_args!("frame tag must be a string, got {other}")))
            },
            None => Err(de::Error::missing_field("type")),
        }
    }
}
