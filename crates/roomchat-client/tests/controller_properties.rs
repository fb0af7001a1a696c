//! Property-based tests for ChatController

mod common;

use common::{Controller, announced, join, sent_frames, session};
use proptest::prelude::*;
use roomchat_client::{ClientError, Message, OutboundFrame, SessionState, TransportEvent};

fn name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

/// Frames that are not JSON objects, or carry no known tag.
fn garbage() -> impl Strategy<Value = String> {
    prop_oneof![
        "[^{]{0,32}",
        "[a-z]{1,6}"
            .prop_filter("unknown tag", |tag| tag != "chat" && tag != "system")
            .prop_map(|tag| format!(r#"{{"type":"{tag}","payload":"x"}}"#)),
        Just(r#"{"payload":{"username":"bob","message":"hi"}}"#.to_owned()),
    ]
}

fn inbound() -> impl Strategy<Value = Message> {
    prop_oneof![
        (name(), ".{0,24}").prop_map(|(user, text)| Message::chat(user, text)),
        ".{0,24}".prop_map(Message::system),
    ]
}

/// One step of a random session.
#[derive(Debug, Clone)]
enum Op {
    Join(String, String),
    Send(String),
    Leave,
    Open,
    Frame(Message),
    Close,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (name(), name()).prop_map(|(user, room)| Op::Join(user, room)),
        name().prop_map(Op::Send),
        Just(Op::Leave),
        Just(Op::Open),
        inbound().prop_map(Op::Frame),
        Just(Op::Close),
    ]
}

fn apply(client: &mut Controller, op: Op) {
    let current = client.transport().session_id();
    let result = match op {
        Op::Join(user, room) => client.join_room(&user, &room),
        Op::Send(text) => client.send_message(&text),
        Op::Leave => {
            client.leave_room();
            Ok(())
        },
        Op::Open => match current {
            Some(session) => client.handle(TransportEvent::Open { session }),
            None => Ok(()),
        },
        Op::Frame(message) => match current {
            Some(session) => {
                let frame = message.encode().unwrap();
                client.handle(TransportEvent::Message { session, frame })
            },
            None => Ok(()),
        },
        Op::Close => match current {
            Some(session) => client.handle(TransportEvent::Close { session }),
            None => Ok(()),
        },
    };
    assert!(result.is_ok(), "unexpected error: {result:?}");
}

/// Property: the log after N inbound frames is exactly those frames in order
#[test]
fn prop_log_preserves_arrival_order() {
    proptest!(|(frames in prop::collection::vec(inbound(), 0..32))| {
        let mut client = announced();
        join(&mut client, "alice", "red");

        for message in &frames {
            let session = session(&client);
            let frame = message.encode().unwrap();
            client.handle(TransportEvent::Message { session, frame }).unwrap();
        }

        prop_assert_eq!(client.messages(), frames.as_slice());
    });
}

/// Property: a blank username or room id never opens a connection
#[test]
fn prop_blank_identity_never_connects() {
    proptest!(|(user in blank(), room in name(), swap in any::<bool>())| {
        let mut client = announced();
        let (user, room) = if swap { (room, user) } else { (user, room) };

        let result = client.join_room(&user, &room);

        prop_assert!(matches!(result, Err(ClientError::Validation(_))));
        prop_assert_eq!(client.state(), &SessionState::Idle);
        prop_assert!(client.transport().connector().opened.is_empty());
        prop_assert!(client.transport().connector().sent.is_empty());
    });
}

/// Property: join frames carry the identity exactly as given
#[test]
fn prop_join_frame_carries_identity_as_given() {
    proptest!(|(user in name(), room in name(), pad in blank())| {
        let user = format!("{pad}{user}{pad}");
        let room = format!("{pad}{room}");
        let mut client = announced();
        join(&mut client, &user, &room);

        prop_assert_eq!(sent_frames(&client), vec![OutboundFrame::join(room, user)]);
    });
}

/// Property: malformed input never changes the log or the session
#[test]
fn prop_malformed_input_leaves_log_untouched() {
    proptest!(|(
        before in prop::collection::vec(inbound(), 0..4),
        garbage in prop::collection::vec(garbage(), 1..8),
    )| {
        let mut client = announced();
        join(&mut client, "alice", "red");
        for message in &before {
            let session = session(&client);
            client.handle(TransportEvent::Message { session, frame: message.encode().unwrap() }).unwrap();
        }

        for frame in garbage {
            let session = session(&client);
            let result = client.handle(TransportEvent::Message { session, frame });
            prop_assert!(matches!(result, Err(ClientError::Protocol(_))));
        }

        prop_assert!(client.is_joined());
        prop_assert_eq!(client.messages(), before.as_slice());
    });
}

/// Property: a connection is live exactly while the session is, so at most
/// one is ever open
#[test]
fn prop_single_live_connection() {
    proptest!(|(ops in prop::collection::vec(op(), 0..48))| {
        let mut client = announced();
        let mut joins_sent = 0;

        for op in ops {
            let was_idle = client.state() == &SessionState::Idle;
            let opened_before = client.transport().connector().opened.len();

            apply(&mut client, op);

            let connector = client.transport().connector();
            let opened = connector.opened.len();
            prop_assert!(opened == opened_before || (was_idle && opened == opened_before + 1));
            prop_assert_eq!(client.transport().is_live(), client.state() != &SessionState::Idle);

            let joins = sent_frames(&client).iter().filter(|f| f.kind() == "join").count();
            prop_assert!(joins >= joins_sent);
            prop_assert!(joins <= opened);
            if let SessionState::Connecting(_) = client.state() {
                prop_assert!(joins < opened);
            }
            joins_sent = joins;
        }
    });
}
