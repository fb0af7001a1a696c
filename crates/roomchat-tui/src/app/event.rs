//! UI events
//!
//! Events fed into the App state machine from terminal input and the
//! connector.

use roomchat_client::TransportEvent;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Event reported by the connector.
    Transport(TransportEvent),
}
