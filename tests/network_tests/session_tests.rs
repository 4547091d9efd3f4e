//! Tests for Transport Session and Client
//!
//! These tests verify:
//! - Session state transitions
//! - Connection errors and their mapping
//! - One fresh connection per exchange
//! - Timeouts vs peer closure
//! - Echo round trip of encoded messages

#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::Duration;

use common::{closed_port, raw_frame, read_up_to, write_raw, StubServer};
use sorictl::network::{Session, SessionState, TcpConnector};
use sorictl::protocol::{encode, FrameVariant, Message};
use sorictl::{Client, ClientConfig, ClientError, Generation};

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_session_lifecycle() {
    let server = StubServer::text(FrameVariant::Short, "OK");
    let connector = TcpConnector::new(&server.config().build());

    let mut session = Session::new(&connector);
    assert_eq!(session.state(), SessionState::Disconnected);

    session.connect().unwrap();
    assert_eq!(session.state(), SessionState::Connected);

    session.send(FrameVariant::Short, br#"{"operation":"getLastSnapshot"}"#).unwrap();
    assert_eq!(session.state(), SessionState::Sending);

    let response = session.receive(FrameVariant::Short).unwrap();
    assert_eq!(response, b"OK");
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_send_requires_connection() {
    let connector = TcpConnector::new(&ClientConfig::default());
    let mut session = Session::new(&connector);

    let err = session.send(FrameVariant::Short, b"{}").unwrap_err();
    assert!(matches!(
        err,
        ClientError::InvalidState {
            expected: SessionState::Connected,
            actual: SessionState::Disconnected,
        }
    ));
}

#[test]
fn test_closed_session_cannot_reconnect() {
    let server = StubServer::text(FrameVariant::Short, "OK");
    let connector = TcpConnector::new(&server.config().build());

    let mut session = Session::new(&connector);
    session.connect().unwrap();
    session.close();
    session.close();

    assert_eq!(session.state(), SessionState::Closed);
    assert!(matches!(session.connect(), Err(ClientError::InvalidState { .. })));
}

// =============================================================================
// Connection Error Tests
// =============================================================================

#[test]
fn test_connection_refused() {
    let config = ClientConfig::builder()
        .host("127.0.0.1")
        .port(closed_port())
        .build();
    let connector = TcpConnector::new(&config);

    let mut session = Session::new(&connector);
    let err = session.connect().unwrap_err();

    assert!(matches!(err, ClientError::ConnectionRefused { .. }), "{:?}", err);
    assert!(err.is_exchange_failure());
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_unresolvable_host() {
    let config = ClientConfig::builder().host("sori.invalid").port(38539).build();
    let client = Client::new(config);

    let err = client.exchange(&Message::new("getLastSnapshot")).unwrap_err();
    assert!(matches!(err, ClientError::HostUnreachable { .. }), "{:?}", err);
}

// =============================================================================
// Frame Failure Tests
// =============================================================================

#[test]
fn test_peer_closes_after_prefix() {
    let server = StubServer::raw(|mut stream| {
        let _ = read_up_to(&mut stream, 2 + 31);
        // Promise 40 bytes, deliver none
        write_raw(&mut stream, &[40, 0]);
    });
    let client = Client::new(server.config().build());

    let err = client.exchange(&Message::new("getLastSnapshot")).unwrap_err();
    assert!(matches!(
        err,
        ClientError::ConnectionClosed { expected: 40, received: 0 }
    ));
    assert!(err.is_exchange_failure());
}

#[test]
fn test_response_timeout_is_distinct_from_closure() {
    let server = StubServer::raw(|mut stream| {
        let _ = read_up_to(&mut stream, 2 + 31);
        thread::sleep(Duration::from_millis(800));
    });
    let client = Client::new(server.config().read_timeout_ms(150).build());

    let err = client.exchange(&Message::new("getLastSnapshot")).unwrap_err();
    assert!(
        matches!(err, ClientError::Timeout { stage: "awaiting response" }),
        "{:?}",
        err
    );
}

#[test]
fn test_oversize_request_sends_no_bytes() {
    let (tx, rx) = crossbeam::channel::unbounded();
    let server = StubServer::raw(move |mut stream| {
        let received = read_up_to(&mut stream, 100_000);
        let _ = tx.send(received.len());
    });
    let client = Client::new(server.config().build());

    let err = client.exchange_raw(&vec![b'x'; 65_536]).unwrap_err();
    assert!(matches!(err, ClientError::PayloadTooLarge { size: 65_536, max: 65_535 }));

    let received = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(received, 0);
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_echo_round_trip_is_byte_identical() {
    for generation in [Generation::One, Generation::Two] {
        let server = StubServer::echo(generation.frame_variant());
        let client = Client::new(server.config().generation(generation).build());

        let message = Message::new("set")
            .with("key", "mutation_rate")
            .with("value", "0.05");
        let request = encode(&message).unwrap();

        let echoed = client.exchange(&message).unwrap();
        assert_eq!(echoed.as_bytes(), request.as_slice());
    }
}

#[test]
fn test_each_exchange_uses_new_connection() {
    let server = StubServer::text(FrameVariant::Short, "OK");
    let client = Client::new(server.config().build());

    for _ in 0..3 {
        assert_eq!(client.exchange(&Message::new("getLastSnapshot")).unwrap(), "OK");
    }

    assert_eq!(server.connections(), 3);
    assert_eq!(server.requests().len(), 3);
}

#[test]
fn test_mixed_prefix_widths() {
    // Early generation 2 clients wrote 2-byte requests and read 4-byte replies
    let server = StubServer::start(FrameVariant::Short, FrameVariant::Long, |_| {
        b"generation 4 best 0.71".to_vec()
    });
    let client = Client::new(
        server
            .config()
            .generation(Generation::Two)
            .request_frame(FrameVariant::Short)
            .build(),
    );

    let text = client.exchange(&Message::new("recentStats")).unwrap();
    assert_eq!(text, "generation 4 best 0.71");
    assert_eq!(server.requests()[0].text(), r#"{"operation":"recentStats"}"#);
}

#[test]
fn test_large_long_response() {
    let big = "x".repeat(300_000);
    let reply = big.clone();
    let server = StubServer::start(FrameVariant::Long, FrameVariant::Long, move |_| {
        reply.as_bytes().to_vec()
    });
    let client = Client::new(server.config().generation(Generation::Two).build());

    assert_eq!(client.exchange(&Message::new("recentStats")).unwrap(), big);
}

#[test]
fn test_raw_response_on_the_wire() {
    let server = StubServer::raw(|mut stream| {
        let _ = read_up_to(&mut stream, 2 + 31);
        write_raw(&mut stream, &raw_frame(2, b"snapshot #3"));
    });
    let client = Client::new(server.config().build());

    assert_eq!(
        client.exchange(&Message::new("getLastSnapshot")).unwrap(),
        "snapshot #3"
    );
}
