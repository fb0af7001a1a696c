//! Client
//!
//! Session state machine for a single-room roomchat client. Owns the one
//! connection to the relay, turns user intents into wire frames, and folds
//! relay frames into an ordered message log.
//!
//! # Architecture
//!
//! The network is kept behind the [`Connector`] trait. The state machines in
//! this crate never perform I/O themselves: they ask the connector to open,
//! send, or close, and advance only when the caller feeds back the resulting
//! [`TransportEvent`]s. The same code therefore runs against a real WebSocket
//! and against a scripted connector in tests.
//!
//! # Components
//!
//! - [`TransportSession`]: lifecycle of the single connection handle
//! - [`ChatController`]: join/send/leave operations and inbound dispatch
//! - [`ControllerConfig`]: endpoint and behavior options
//! - [`TransportEvent`]: events fed back from the connector
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::WsConnector`]: WebSocket connector on tokio-tungstenite

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod config;
mod error;
mod event;
mod session;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::{ChatController, Identity, SessionState};
pub use config::{ControllerConfig, DEFAULT_ENDPOINT};
pub use error::{ClientError, TransportError, ValidationError};
pub use event::{SessionEvent, SessionId, TransportEvent};
pub use roomchat_proto::{ChatPayload, Message, OutboundFrame, ProtocolError, SystemNotice};
pub use session::{Connector, TransportSession, TransportState};
