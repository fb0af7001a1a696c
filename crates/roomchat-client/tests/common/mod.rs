//! Shared fixtures for controller tests.

#![allow(dead_code)]

use std::io;

use roomchat_client::{
    ChatController, Connector, ControllerConfig, OutboundFrame, SessionId, TransportEvent,
};

/// Connector that records every call and lets the test play the network.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    /// `(endpoint, session)` per `open` call.
    pub opened: Vec<(String, SessionId)>,
    /// Frames handed to `send`, in order.
    pub sent: Vec<String>,
    /// Sessions passed to `close`.
    pub closed: Vec<SessionId>,
    /// Reject every `send` when set.
    pub fail_sends: bool,
}

impl Connector for RecordingConnector {
    type Handle = SessionId;
    type Error = io::Error;

    fn open(&mut self, endpoint: &str, session: SessionId) -> SessionId {
        self.opened.push((endpoint.to_owned(), session));
        session
    }

    fn send(&mut self, _handle: &SessionId, frame: String) -> Result<(), io::Error> {
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "relay gone"));
        }
        self.sent.push(frame);
        Ok(())
    }

    fn close(&mut self, handle: SessionId) {
        self.closed.push(handle);
    }
}

pub type Controller = ChatController<RecordingConnector>;

pub const ENDPOINT: &str = "ws://relay.test:8080";

/// Idle controller with the given config preset.
pub fn controller(config: ControllerConfig) -> Controller {
    ChatController::new(config, RecordingConnector::default())
}

/// Idle controller with explicit signaling.
pub fn announced() -> Controller {
    controller(ControllerConfig::announced(ENDPOINT))
}

/// Idle controller relying on connection closure only.
pub fn silent() -> Controller {
    controller(ControllerConfig::silent(ENDPOINT))
}

/// Current session id. Panics if no connection was opened.
pub fn session(controller: &Controller) -> SessionId {
    controller.transport().session_id().unwrap()
}

/// Deliver the open confirmation for the current connection.
pub fn confirm_open(controller: &mut Controller) {
    let session = session(controller);
    controller.handle(TransportEvent::Open { session }).unwrap();
}

/// Join and confirm the open.
pub fn join(controller: &mut Controller, username: &str, room_id: &str) {
    controller.join_room(username, room_id).unwrap();
    confirm_open(controller);
}

/// Deliver one inbound frame on the current connection.
pub fn deliver(controller: &mut Controller, frame: &str) -> Result<(), roomchat_client::ClientError> {
    let session = session(controller);
    controller.handle(TransportEvent::Message { session, frame: frame.to_owned() })
}

/// Deliver a close on the current connection.
pub fn remote_close(controller: &mut Controller) {
    let session = session(controller);
    controller.handle(TransportEvent::Close { session }).unwrap();
}

/// Frames sent so far, decoded.
pub fn sent_frames(controller: &Controller) -> Vec<OutboundFrame> {
    controller
        .transport()
        .connector()
        .sent
        .iter()
        .map(|raw| OutboundFrame::decode(raw).unwrap())
        .collect()
}

/// Wire tags of the frames sent so far.
pub fn sent_kinds(controller: &Controller) -> Vec<&'static str> {
    sent_frames(controller).iter().map(OutboundFrame::kind).collect()
}
