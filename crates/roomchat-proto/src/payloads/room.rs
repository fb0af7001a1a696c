//! Room membership payloads.

use serde::{Deserialize, Serialize};

/// Body of a `join` frame.
///
/// Sent once per session, right after the connection opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    /// Room to join.
    pub room_id: String,
    /// Display name of the joining user.
    pub username: String,
}

/// Body of a `leave` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePayload {
    /// Display name of the departing user.
    pub username: String,
    /// Room being left.
    pub room_id: String,
}
