//! Session Tests
//!
//! Handshake and single-frame delivery over an in-memory transport. Tests
//! pass `&mut MockTransport` so they can inspect it afterwards.

use std::io;

use netlight::network::{Session, Transport};
use netlight::protocol::{
    encode_light_frame, AesKey, Color, DeviceIdentity, LightCommand, ProtocolVersion, HEADER_SIZE,
};
use netlight::{Client, ClientConfig, HandshakeError, NetlightError, Result};

/// Scripted transport that records what the client does
#[derive(Default)]
struct MockTransport {
    greeting: Vec<u8>,
    fail_receive: bool,
    fail_send: bool,
    receives: usize,
    sent: Vec<Vec<u8>>,
    closes: usize,
}

impl MockTransport {
    fn with_greeting(greeting: &[u8]) -> Self {
        Self {
            greeting: greeting.to_vec(),
            ..Default::default()
        }
    }
}

impl Transport for MockTransport {
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.receives += 1;
        if self.fail_receive {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out").into());
        }
        let n = self.greeting.len().min(buf.len());
        buf[..n].copy_from_slice(&self.greeting[..n]);
        Ok(n)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_send {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe").into());
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}

const NL5_GREETING: &[u8] = b"NL5\x00\x01\x00abcdefghijklmnop";

fn nl5() -> DeviceIdentity {
    DeviceIdentity::new("NL5", ProtocolVersion::CURRENT)
}

fn frame() -> Vec<u8> {
    encode_light_frame(ProtocolVersion::CURRENT, &LightCommand::new(0, Color::rgb(1, 2, 3)))
        .unwrap()
        .to_vec()
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_establish_reads_once() {
    let mut transport = MockTransport::with_greeting(NL5_GREETING);
    let session = Session::establish(&mut transport, &nl5()).unwrap();

    assert_eq!(session.greeting().model, "NL5");
    assert_eq!(session.greeting().iv, Some(*b"abcdefghijklmnop"));
    drop(session);
    assert_eq!(transport.receives, 1);
}

#[test]
fn test_establish_failure_closes_transport() {
    let mut transport = MockTransport::with_greeting(b"NL5\x00\x02\x00");
    let result = Session::establish(&mut transport, &nl5());

    assert!(matches!(
        result,
        Err(NetlightError::HandshakeMismatch(HandshakeError::VersionMismatch { .. }))
    ));
    assert_eq!(transport.closes, 1);
    assert!(transport.sent.is_empty());
}

#[test]
fn test_receive_error_closes_transport() {
    let mut transport = MockTransport {
        fail_receive: true,
        ..Default::default()
    };
    let result = Session::establish(&mut transport, &nl5());

    assert!(matches!(result, Err(NetlightError::Transport(_))));
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_device_hangs_up_before_greeting() {
    let mut transport = MockTransport::default();
    let result = Session::establish(&mut transport, &nl5());

    assert!(matches!(
        result,
        Err(NetlightError::HandshakeMismatch(HandshakeError::TooShort { received: 0, .. }))
    ));
}

#[test]
fn test_session_close_returns_greeting() {
    let mut transport = MockTransport::with_greeting(NL5_GREETING);
    let session = Session::establish(&mut transport, &nl5()).unwrap();
    let greeting = session.close();

    assert_eq!(greeting.version, ProtocolVersion::new(1, 0));
    assert_eq!(transport.closes, 1);
}

// =============================================================================
// Client Delivery Tests
// =============================================================================

#[test]
fn test_deliver_sends_frame_and_closes() {
    let client = Client::new(ClientConfig::default());
    let mut transport = MockTransport::with_greeting(NL5_GREETING);

    let greeting = client.deliver(&mut transport, &frame()).unwrap();

    assert_eq!(greeting.model, "NL5");
    assert_eq!(transport.sent, vec![frame()]);
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_deliver_wrong_device_sends_nothing() {
    let client = Client::new(ClientConfig::default());
    let mut transport = MockTransport::with_greeting(b"XYZ\x00\x01\x00");

    let err = client.deliver(&mut transport, &frame()).unwrap_err();

    assert!(err.to_string().contains("Unsupported or unrecognized device"));
    assert!(transport.sent.is_empty());
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_deliver_send_failure_still_closes() {
    let client = Client::new(ClientConfig::default());
    let mut transport = MockTransport {
        greeting: NL5_GREETING.to_vec(),
        fail_send: true,
        ..Default::default()
    };

    let result = client.deliver(&mut transport, &frame());

    assert!(matches!(result, Err(NetlightError::Transport(_))));
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_deliver_honours_configured_identity() {
    let config = ClientConfig::builder()
        .model("NL7")
        .protocol_version(ProtocolVersion::new(1, 3))
        .build();
    let client = Client::new(config);

    let mut accepted = MockTransport::with_greeting(b"NL7\x00\x01\x03");
    assert!(client.deliver(&mut accepted, &frame()).is_ok());

    let mut rejected = MockTransport::with_greeting(NL5_GREETING);
    assert!(client.deliver(&mut rejected, &frame()).is_err());
}

// =============================================================================
// Encrypted Delivery Tests
// =============================================================================

const NL5_V2_GREETING: &[u8] = b"NL5\x00\x02\x00abcdefghijklmnop";

fn v2_config() -> netlight::config::ClientConfigBuilder {
    ClientConfig::builder().protocol_version(ProtocolVersion::new(2, 0))
}

fn v2_frame() -> Vec<u8> {
    encode_light_frame(ProtocolVersion::new(2, 0), &LightCommand::new(0, Color::rgb(1, 2, 3)))
        .unwrap()
        .to_vec()
}

#[test]
fn test_deliver_encrypts_for_protocol_two() {
    let client = Client::new(v2_config().key(AesKey::new([9; 16])).build());
    let mut transport = MockTransport::with_greeting(NL5_V2_GREETING);

    client.deliver(&mut transport, &v2_frame()).unwrap();

    let sent = &transport.sent[0];
    assert_eq!(&sent[..3], &[0x17, 2, 0]);
    // sender IV (16) + 14 payload and 20 digest padded to 48
    assert_eq!(u16::from_le_bytes([sent[3], sent[4]]), 64);
    assert_eq!(sent.len(), HEADER_SIZE + 64);
    assert_ne!(&sent[HEADER_SIZE..], &v2_frame()[HEADER_SIZE..]);
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_deliver_without_key_sends_nothing() {
    let client = Client::new(v2_config().build());
    let mut transport = MockTransport::with_greeting(NL5_V2_GREETING);

    let err = client.deliver(&mut transport, &v2_frame()).unwrap_err();

    assert!(matches!(err, NetlightError::Encryption(_)));
    assert!(err.to_string().contains("requires a device key"));
    assert!(transport.sent.is_empty());
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_deliver_without_greeting_iv_sends_nothing() {
    let client = Client::new(v2_config().key(AesKey::new([9; 16])).build());
    let mut transport = MockTransport::with_greeting(b"NL5\x00\x02\x00");

    let err = client.deliver(&mut transport, &v2_frame()).unwrap_err();

    assert!(matches!(err, NetlightError::Encryption(_)));
    assert!(transport.sent.is_empty());
    assert_eq!(transport.closes, 1);
}

#[test]
fn test_protocol_one_ignores_key() {
    let client = Client::new(ClientConfig::builder().key(AesKey::new([9; 16])).build());
    let mut transport = MockTransport::with_greeting(NL5_GREETING);

    client.deliver(&mut transport, &frame()).unwrap();
    assert_eq!(transport.sent, vec![frame()]);
}
