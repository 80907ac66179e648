//! Integration tests for the pattern loop.
//!
//! A scripted console and transport stand in for stdin/stdout and the
//! socket. Every operation is appended to a shared log so the tests can
//! assert not just counts but strict ordering.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use wirecat::codec::{RecvCodec, SendCodec};
use wirecat::console::Console;
use wirecat::transport::{SendMode, SendStatus, Transport};
use wirecat::{Bridge, BridgeError, Config, EndpointMode, Result, Role, SendPolicy};

/// Everything the loop did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Marker(String),
    Send(Vec<u8>, SendMode),
    Recv,
    Print(String),
}

type Log = Arc<Mutex<Vec<Op>>>;

struct ScriptedConsole {
    lines: VecDeque<String>,
    log: Log,
}

impl ScriptedConsole {
    fn new(lines: &[&str], log: &Log) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            log: Arc::clone(log),
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    async fn print_line(&mut self, text: &str) -> Result<()> {
        self.log.lock().unwrap().push(Op::Print(text.to_string()));
        Ok(())
    }

    async fn print_marker(&mut self, marker: &str) -> Result<()> {
        self.log.lock().unwrap().push(Op::Marker(marker.to_string()));
        Ok(())
    }
}

struct ScriptedTransport {
    inbound: VecDeque<Bytes>,
    /// When false, every send reports the payload as dropped.
    ready: bool,
    log: Log,
}

impl ScriptedTransport {
    fn new(inbound: &[&[u8]], log: &Log) -> Self {
        Self {
            inbound: inbound.iter().map(|m| Bytes::copy_from_slice(m)).collect(),
            ready: true,
            log: Arc::clone(log),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, payload: Bytes, mode: SendMode) -> Result<SendStatus> {
        self.log.lock().unwrap().push(Op::Send(payload.to_vec(), mode));
        if self.ready {
            Ok(SendStatus::Sent)
        } else {
            Ok(SendStatus::Dropped)
        }
    }

    async fn recv(&mut self) -> Result<Bytes> {
        self.log.lock().unwrap().push(Op::Recv);
        self.inbound.pop_front().ok_or(BridgeError::ConnectionClosed)
    }
}

fn config(role: Role, send_codec: SendCodec, recv_codec: RecvCodec) -> Config {
    Config {
        role,
        mode: EndpointMode::Connect,
        address: "tcp://127.0.0.1:5555".to_string(),
        send_codec,
        recv_codec,
        send_policy: SendPolicy::Warn,
        verbose: false,
    }
}

fn send(payload: &[u8]) -> Op {
    Op::Send(payload.to_vec(), SendMode::Immediate)
}

fn logged(log: &Log) -> Vec<Op> {
    log.lock().unwrap().clone()
}

/// A publisher performs one encode+send per line and stops at end of
/// input, without blocking on anything else.
#[tokio::test]
async fn test_publisher_stops_when_console_exhausted() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["one", "two", "three"], &log);
    let transport = ScriptedTransport::new(&[], &log);
    let cfg = config(Role::Publisher, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    Bridge::new(console, transport, &cfg).run().await.unwrap();

    assert_eq!(logged(&log), vec![send(b"one"), send(b"two"), send(b"three")]);
}

/// A subscriber prints every received message until the transport fails.
#[tokio::test]
async fn test_subscriber_prints_each_message() {
    let log = Log::default();
    let console = ScriptedConsole::new(&[], &log);
    let transport = ScriptedTransport::new(&[b"hello".as_slice(), b"world".as_slice()], &log);
    let cfg = config(Role::Subscriber, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();

    assert!(matches!(err, BridgeError::ConnectionClosed));
    assert_eq!(
        logged(&log),
        vec![
            Op::Recv,
            Op::Print("hello".to_string()),
            Op::Recv,
            Op::Print("world".to_string()),
            Op::Recv,
        ]
    );
}

/// A requester strictly alternates send-then-receive, one of each per
/// round trip, with no reordering.
#[tokio::test]
async fn test_requester_alternates_send_then_receive() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["a", "b", "c"], &log);
    let transport =
        ScriptedTransport::new(&[b"ra".as_slice(), b"rb".as_slice(), b"rc".as_slice()], &log);
    let cfg = config(Role::Requester, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();
    assert!(matches!(err, BridgeError::ConnectionClosed));

    let log = logged(&log);
    assert_eq!(
        log[..9],
        vec![
            send(b"a"),
            Op::Recv,
            Op::Print("ra".to_string()),
            send(b"b"),
            Op::Recv,
            Op::Print("rb".to_string()),
            send(b"c"),
            Op::Recv,
            Op::Print("rc".to_string()),
        ]
    );
    // After the console closes the requester degenerates to a pure
    // receiver; the final recv is what surfaced the closed transport.
    assert_eq!(log[9..], vec![Op::Recv]);
}

/// A replier strictly alternates receive-then-send.
#[tokio::test]
async fn test_replier_receives_then_replies() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["a1", "a2"], &log);
    let transport = ScriptedTransport::new(&[b"q1".as_slice(), b"q2".as_slice()], &log);
    let cfg = config(Role::Replier, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();
    assert!(matches!(err, BridgeError::ConnectionClosed));

    assert_eq!(
        logged(&log),
        vec![
            Op::Recv,
            Op::Print("q1".to_string()),
            send(b"a1"),
            Op::Recv,
            Op::Print("q2".to_string()),
            send(b"a2"),
            Op::Recv,
        ]
    );
}

/// The wire payload of a json2cbor publisher, fed to a cbor2json
/// subscriber, prints as 2-space-indented JSON.
#[tokio::test]
async fn test_json_to_cbor_round_trip_pretty_prints() {
    let pub_log = Log::default();
    let console = ScriptedConsole::new(&[r#"{"a":1}"#], &pub_log);
    let transport = ScriptedTransport::new(&[], &pub_log);
    let cfg = config(Role::Publisher, SendCodec::Json2Cbor, RecvCodec::Bin2Str);
    Bridge::new(console, transport, &cfg).run().await.unwrap();

    let wire = match &logged(&pub_log)[0] {
        Op::Send(payload, _) => payload.clone(),
        op => panic!("expected a send, got {:?}", op),
    };

    let sub_log = Log::default();
    let console = ScriptedConsole::new(&[], &sub_log);
    let transport = ScriptedTransport::new(&[wire.as_slice()], &sub_log);
    let cfg = config(Role::Subscriber, SendCodec::Str2Bin, RecvCodec::Cbor2Json);
    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();
    assert!(matches!(err, BridgeError::ConnectionClosed));

    assert_eq!(
        logged(&sub_log)[1],
        Op::Print("{\n  \"a\": 1\n}".to_string())
    );
}

/// A line the send codec rejects aborts the run before anything is sent;
/// the loop does not skip it and continue.
#[tokio::test]
async fn test_malformed_hex_line_is_fatal() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["zz"], &log);
    let transport = ScriptedTransport::new(&[], &log);
    let cfg = config(Role::Publisher, SendCodec::Hex2Bin, RecvCodec::Bin2Str);

    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();

    assert!(matches!(err, BridgeError::Hex(_)));
    assert!(logged(&log).is_empty());
}

/// A payload the receive codec rejects aborts the run mid-loop.
#[tokio::test]
async fn test_malformed_cbor_payload_is_fatal() {
    let log = Log::default();
    let console = ScriptedConsole::new(&[], &log);
    let transport = ScriptedTransport::new(&[&[0xff, 0x13][..]], &log);
    let cfg = config(Role::Subscriber, SendCodec::Str2Bin, RecvCodec::Cbor2Json);

    let err = Bridge::new(console, transport, &cfg).run().await.unwrap_err();

    assert!(matches!(err, BridgeError::CborDecode(_)));
    assert_eq!(logged(&log), vec![Op::Recv]);
}

/// A bound limits the helper to that many iterations even with input
/// left over.
#[tokio::test]
async fn test_drain_console_respects_bound() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["1", "2", "3", "4", "5"], &log);
    let transport = ScriptedTransport::new(&[], &log);
    let cfg = config(Role::Publisher, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    let mut bridge = Bridge::new(console, transport, &cfg);
    bridge.drain_console(Some(2)).await.unwrap();

    assert_eq!(logged(&log), vec![send(b"1"), send(b"2")]);
}

/// Dropped sends are not retried: each line produces exactly one attempt
/// and the run still completes.
#[tokio::test]
async fn test_dropped_sends_are_not_retried() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["one", "two"], &log);
    let mut transport = ScriptedTransport::new(&[], &log);
    transport.ready = false;
    let cfg = config(Role::Publisher, SendCodec::Str2Bin, RecvCodec::Bin2Str);

    Bridge::new(console, transport, &cfg).run().await.unwrap();

    assert_eq!(logged(&log), vec![send(b"one"), send(b"two")]);
}

/// The block policy switches sends to waiting mode.
#[tokio::test]
async fn test_block_policy_sends_in_wait_mode() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["one"], &log);
    let transport = ScriptedTransport::new(&[], &log);
    let mut cfg = config(Role::Publisher, SendCodec::Str2Bin, RecvCodec::Bin2Str);
    cfg.send_policy = SendPolicy::Block;

    Bridge::new(console, transport, &cfg).run().await.unwrap();

    assert_eq!(logged(&log), vec![Op::Send(b"one".to_vec(), SendMode::Wait)]);
}

/// Verbose markers appear before each read/receive without disturbing
/// the operation ordering.
#[tokio::test]
async fn test_verbose_markers_precede_each_step() {
    let log = Log::default();
    let console = ScriptedConsole::new(&["one", "two"], &log);
    let transport = ScriptedTransport::new(&[], &log);
    let mut cfg = config(Role::Publisher, SendCodec::Str2Bin, RecvCodec::Bin2Str);
    cfg.verbose = true;

    Bridge::new(console, transport, &cfg).run().await.unwrap();

    assert_eq!(
        logged(&log),
        vec![
            Op::Marker(">>> ".to_string()),
            send(b"one"),
            Op::Marker(">>> ".to_string()),
            send(b"two"),
            // The final marker precedes the read that found end of input.
            Op::Marker(">>> ".to_string()),
        ]
    );
}
