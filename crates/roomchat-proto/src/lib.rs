//! Wire protocol for roomchat
//!
//! Every frame exchanged with the relay is a single UTF-8 JSON text message of
//! the shape `{ "type": <tag>, "payload": <body> }`.
//!
//! # Components
//!
//! - [`OutboundFrame`]: frames the client sends (`join`, `chat`, `leave`)
//! - [`Message`]: frames the relay delivers (`chat`, `system`)
//! - [`ProtocolError`]: encode/decode failures
//!
//! Inbound decoding only checks what it must to dispatch: the frame is a JSON
//! object with a known `type` tag. Payload contents are taken as they come.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod frame;
pub mod payloads;

pub use errors::ProtocolError;
pub use frame::OutboundFrame;
pub use payloads::{ChatPayload, JoinPayload, LeavePayload, Message, SystemNotice};
