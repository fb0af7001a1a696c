//! User-visible message payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `chat` frame.
///
/// The same shape travels in both directions: the client sends it, the relay
/// echoes it to every occupant of the room (the sender included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    /// Author's display name.
    pub username: String,
    /// Message text.
    pub message: String,
    /// Room the message belongs to. Some relays omit it on echo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl ChatPayload {
    /// Build from whatever the relay put in a `chat` payload.
    ///
    /// Missing fields become empty, non-string fields are rendered as JSON
    /// text, and a non-object payload is taken as the message text.
    pub(crate) fn from_payload(payload: Value) -> Self {
        let mut fields = match payload {
            Value::Object(fields) => fields,
            other => {
                return Self { username: String::new(), message: lenient_text(other), room_id: None };
            },
        };

        let mut text = |key: &str| fields.remove(key).map_or_else(String::new, lenient_text);
        let username = text("username");
        let message = text("message");
        let room_id = match fields.remove("roomId") {
            None | Some(Value::Null) => None,
            Some(value) => Some(lenient_text(value)),
        };

        Self { username, message, room_id }
    }

    /// Returns true if this line was written by `username`.
    pub fn is_from(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Body of a `system` frame: a free-text notice.
///
/// On the wire the payload is a bare JSON string. Anything else the relay
/// sends is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemNotice {
    /// Notice text.
    pub text: String,
}

impl SystemNotice {
    pub(crate) fn from_payload(payload: Value) -> Self {
        Self { text: lenient_text(payload) }
    }
}

/// Strings pass through, `null` is empty, anything else is its JSON text.
fn lenient_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
