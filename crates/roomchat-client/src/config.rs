//! Controller configuration.

/// Relay endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8080";

/// Chat controller configuration.
///
/// Relays in the wild disagree on how departures are signaled, so the leave
/// behavior is spelled out as explicit options rather than baked in. Two
/// presets cover the known behavior sets: [`ControllerConfig::announced`] and
/// [`ControllerConfig::silent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Relay endpoint. Fixed for the lifetime of the controller.
    pub endpoint: String,
    /// Send a `leave` frame before closing on `leave_room`.
    pub send_leave_frame: bool,
    /// Append `"<username> has left the room."` to the log when the relay
    /// closes a joined session.
    pub append_departure_notice: bool,
    /// Include `roomId` in outbound `chat` frames.
    pub include_room_in_chat: bool,
}

impl ControllerConfig {
    /// Explicit signaling: leave frames, departure notices, room id on every
    /// chat frame.
    pub fn announced(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            send_leave_frame: true,
            append_departure_notice: true,
            include_room_in_chat: true,
        }
    }

    /// Connection closure is the only departure signal; chat frames carry no
    /// room id.
    pub fn silent(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            send_leave_frame: false,
            append_departure_notice: false,
            include_room_in_chat: false,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::announced(DEFAULT_ENDPOINT)
    }
}
