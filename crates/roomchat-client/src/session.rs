//! Transport session state machine.
//!
//! Owns the single connection handle and tracks its lifecycle. All network
//! work is delegated to a [`Connector`]; this type only decides which calls
//! are legal and which reported events belong to the live connection.
//!
//! # State Machine
//!
//! ```text
//! ┌────────┐  open   ┌────────────┐  Open   ┌──────┐
//! │ Closed │────────>│ Connecting │────────>│ Open │
//! └────────┘         └────────────┘         └──────┘
//!     ^                    │ close             │ close
//!     │                    ↓                   │
//!     │     Close     ┌─────────┐              │
//!     └───────────────│ Closing │<─────────────┘
//!                     └─────────┘
//! ```
//!
//! A `Close` event from `Open` or `Connecting` (remote closure, failed
//! connect) goes straight to `Closed`.

use tracing::{debug, trace};

use crate::{
    error::TransportError,
    event::{SessionEvent, SessionId, TransportEvent},
};

/// Network backend for a [`TransportSession`].
///
/// Implementations must not block. Results of `open` and `close` are reported
/// later as [`TransportEvent`]s tagged with the [`SessionId`] passed to `open`:
///
/// - `open` eventually yields `Open` followed by any number of `Message`s, or
///   `Close` if the endpoint is unreachable
/// - `close` eventually yields `Close`
/// - a connection dropped by the peer yields `Close`
///
/// # Implementations
///
/// - **WebSocket**: [`crate::transport::WsConnector`] (feature `transport`)
/// - **Tests**: scripted connectors that record calls
pub trait Connector {
    /// Handle to one live connection.
    type Handle;

    /// Error returned when a frame cannot be handed off.
    type Error: std::error::Error;

    /// Start connecting to `endpoint`. Returns immediately.
    fn open(&mut self, endpoint: &str, session: SessionId) -> Self::Handle;

    /// Queue one text frame on an open connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection can no longer accept frames.
    fn send(&mut self, handle: &Self::Handle, frame: String) -> Result<(), Self::Error>;

    /// Begin orderly teardown. Consumes the handle.
    fn close(&mut self, handle: Self::Handle);
}

/// Lifecycle of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    /// No connection.
    Closed,
    /// `open` issued, waiting for the open confirmation.
    Connecting,
    /// Connection usable.
    Open,
    /// `close` issued, waiting for the close confirmation.
    Closing,
}

/// Owns at most one connection handle.
pub struct TransportSession<C: Connector> {
    connector: C,
    state: TransportState,
    /// Connection whose events are accepted. `None` once fully closed.
    current: Option<SessionId>,
    /// Present while `Connecting` or `Open`.
    handle: Option<C::Handle>,
    last_session: u64,
}

impl<C: Connector> TransportSession<C> {
    /// Create a closed session over `connector`.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            state: TransportState::Closed,
            current: None,
            handle: None,
            last_session: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Connection whose events are currently accepted.
    pub fn session_id(&self) -> Option<SessionId> {
        self.current
    }

    /// True while a handle is held (`Connecting` or `Open`).
    pub fn is_live(&self) -> bool {
        matches!(self.state, TransportState::Connecting | TransportState::Open)
    }

    /// The underlying connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// The underlying connector, mutably.
    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Start a new connection.
    ///
    /// Allowed from `Closed` and `Closing`; in the latter case the pending
    /// close confirmation of the old connection will be ignored.
    ///
    /// # Errors
    ///
    /// - `TransportError::AlreadyOpen` if a connection is connecting or open
    pub fn open(&mut self, endpoint: &str) -> Result<SessionId, TransportError> {
        if self.is_live() {
            return Err(TransportError::AlreadyOpen { state: self.state });
        }

        self.last_session = self.last_session.wrapping_add(1);
        let session = SessionId::new(self.last_session);

        let handle = self.connector.open(endpoint, session);
        self.handle = Some(handle);
        self.current = Some(session);
        self.state = TransportState::Connecting;

        debug!(%session, endpoint, "transport connecting");
        Ok(session)
    }

    /// Send one serialized frame.
    ///
    /// # Errors
    ///
    /// - `TransportError::NotOpen` unless the connection is open
    /// - `TransportError::Send` if the connector rejects the frame
    pub fn send(&mut self, frame: String) -> Result<(), TransportError> {
        let (TransportState::Open, Some(handle)) = (self.state, self.handle.as_ref()) else {
            return Err(TransportError::NotOpen { state: self.state });
        };

        self.connector.send(handle, frame).map_err(|e| TransportError::Send(e.to_string()))
    }

    /// Begin closing the connection. No-op without a handle.
    pub fn close(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        debug!(session = ?self.current, from = ?self.state, "transport closing");
        self.state = TransportState::Closing;
        self.connector.close(handle);
    }

    /// Check a reported event against the current connection and state.
    ///
    /// Returns the event if it applies, `None` if it is stale or out of
    /// order. Nothing is accepted before `open` or after the close
    /// confirmation.
    pub fn accept(&mut self, event: TransportEvent) -> Option<SessionEvent> {
        if self.current != Some(event.session()) {
            trace!(event_session = %event.session(), current = ?self.current, "dropping stale transport event");
            return None;
        }

        match (self.state, event) {
            (TransportState::Connecting, TransportEvent::Open { .. }) => {
                self.state = TransportState::Open;
                Some(SessionEvent::Opened)
            },
            (TransportState::Open, TransportEvent::Message { frame, .. }) => {
                Some(SessionEvent::Frame(frame))
            },
            (
                TransportState::Connecting | TransportState::Open | TransportState::Closing,
                TransportEvent::Close { session },
            ) => {
                debug!(%session, from = ?self.state, "transport closed");
                self.state = TransportState::Closed;
                self.current = None;
                self.handle = None;
                Some(SessionEvent::Closed)
            },
            (state, event) => {
                debug!(?state, ?event, "dropping transport event invalid for state");
                None
            },
        }
    }
}
