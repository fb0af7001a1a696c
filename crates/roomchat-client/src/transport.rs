//! WebSocket transport for the client.
//!
//! Provides [`WsConnector`], a [`Connector`] that runs every connection on its
//! own tokio task. This is a thin layer that just moves text frames; session
//! rules remain in the Sans-IO [`TransportSession`](crate::TransportSession)
//! and [`ChatController`](crate::ChatController).
//!
//! # Task Lifecycle
//!
//! ```text
//! open ──> connect_async ──ok──> Open ──> pump frames ──> Close
//!                │                              ^
//!                └──err────────────────────────┘
//! ```
//!
//! Each task reports exactly one `Close`, whatever ends it: a failed connect,
//! a close frame from the relay, a read or write error, or a local `close`.

use std::time::Duration;

use futures::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, trace, warn};

use crate::{
    event::{SessionId, TransportEvent},
    session::Connector,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a local close waits for the relay to answer the close frame.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// The connection task behind a handle has exited.
#[derive(Debug, Error)]
#[error("connection {0} is gone")]
pub struct ConnectionGone(pub SessionId);

/// Commands from the handle to its connection task.
#[derive(Debug)]
enum Outgoing {
    Frame(String),
    Close,
}

/// Handle to one connection task.
///
/// Dropping the handle has the same effect as closing it.
#[derive(Debug)]
pub struct WsHandle {
    session: SessionId,
    outgoing: mpsc::UnboundedSender<Outgoing>,
}

impl WsHandle {
    /// Connection this handle drives.
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// WebSocket [`Connector`] on tokio-tungstenite.
///
/// Every connection task reports into the same event channel, returned by
/// [`WsConnector::new`]. The owner drains it and feeds each event to
/// [`ChatController::handle`](crate::ChatController::handle).
#[derive(Debug, Clone)]
pub struct WsConnector {
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl WsConnector {
    /// Create a connector and the receiver for its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { events }, rx)
    }
}

impl Connector for WsConnector {
    type Handle = WsHandle;
    type Error = ConnectionGone;

    /// Spawn the connection task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    fn open(&mut self, endpoint: &str, session: SessionId) -> WsHandle {
        let (outgoing, commands) = mpsc::unbounded_channel();
        tokio::spawn(run_connection(endpoint.to_owned(), session, commands, self.events.clone()));
        WsHandle { session, outgoing }
    }

    fn send(&mut self, handle: &WsHandle, frame: String) -> Result<(), ConnectionGone> {
        handle.outgoing.send(Outgoing::Frame(frame)).map_err(|_| ConnectionGone(handle.session))
    }

    fn close(&mut self, handle: WsHandle) {
        // Task already gone means its Close is already queued
        let _ = handle.outgoing.send(Outgoing::Close);
    }
}

/// Run one connection, bridging between the command channel and the socket.
async fn run_connection(
    endpoint: String,
    session: SessionId,
    mut commands: mpsc::UnboundedReceiver<Outgoing>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    // No frames can be queued before Open, so any command here is a close
    let connected = tokio::select! {
        result = connect_async(endpoint.as_str()) => result,
        _ = commands.recv() => {
            debug!(%session, "connect aborted");
            let _ = events.send(TransportEvent::Close { session });
            return;
        }
    };

    let ws = match connected {
        Ok((ws, _response)) => ws,
        Err(e) => {
            warn!(%session, %endpoint, error = %e, "websocket connect failed");
            let _ = events.send(TransportEvent::Close { session });
            return;
        },
    };

    debug!(%session, %endpoint, "websocket open");
    if events.send(TransportEvent::Open { session }).is_err() {
        return;
    }

    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Outgoing::Frame(frame)) => {
                    if let Err(e) = sink.send(Message::text(frame)).await {
                        warn!(%session, error = %e, "websocket write failed");
                        break;
                    }
                },
                Some(Outgoing::Close) | None => {
                    close_gracefully(&mut sink, &mut stream, session).await;
                    break;
                },
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let frame = text.as_str().to_owned();
                    if events.send(TransportEvent::Message { session, frame }).is_err() {
                        break;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    debug!(%session, ?frame, "relay closed connection");
                    break;
                },
                Some(Ok(other)) => {
                    trace!(%session, len = other.len(), "ignoring non-text frame");
                },
                Some(Err(e)) => {
                    warn!(%session, error = %e, "websocket read failed");
                    break;
                },
                None => {
                    debug!(%session, "websocket stream ended");
                    break;
                },
            },
        }
    }

    let _ = events.send(TransportEvent::Close { session });
}

/// Send a close frame and wait briefly for the relay's answer.
async fn close_gracefully(
    sink: &mut SplitSink<WsStream, Message>,
    stream: &mut SplitStream<WsStream>,
    session: SessionId,
) {
    if let Err(e) = sink.send(Message::Close(None)).await {
        debug!(%session, error = %e, "close frame not sent");
        return;
    }

    let answered = tokio::time::timeout(CLOSE_TIMEOUT, async {
        while let Some(Ok(message)) = stream.next().await {
            if message.is_close() {
                break;
            }
        }
    })
    .await;

    if answered.is_err() {
        debug!(%session, "close handshake timed out");
    }
}
