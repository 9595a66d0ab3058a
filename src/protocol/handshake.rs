//! Handshake verification
//!
//! On connect the device writes, unsolicited and in a single write:
//!
//! ```text
//! ┌──────────────┬─────────┬──────────┬──────────┬───────────────┐
//! │ Model (n)    │ Sep (1) │ Major(1) │ Minor(1) │  Random (16)  │
//! └──────────────┴─────────┴──────────┴──────────┴───────────────┘
//! ```
//!
//! The version bytes are read at fixed offsets `n + 1` and `n + 2`; the
//! separator is never inspected.

use crate::error::HandshakeError;
use super::{DeviceIdentity, ProtocolVersion};

/// Receive buffer for the greeting; the device sends far less
pub const GREETING_BUFFER_SIZE: usize = 1024;

/// Length of the random block that trails the version bytes
pub const IV_LENGTH: usize = 16;

/// An accepted device greeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub model: String,
    pub version: ProtocolVersion,

    /// Device-supplied random bytes, kept for encrypted framing
    pub iv: Option<[u8; IV_LENGTH]>,
}

/// Check a greeting against the expected model and protocol version
pub fn verify_greeting(
    bytes: &[u8],
    expected: &DeviceIdentity,
) -> Result<Greeting, HandshakeError> {
    let token = expected.model.as_bytes();
    let major_at = token.len() + 1;
    let minor_at = token.len() + 2;

    if bytes.len() < token.len() + 1 {
        return Err(HandshakeError::TooShort {
            received: bytes.len(),
            required: token.len() + 1,
        });
    }

    if &bytes[..token.len()] != token {
        return Err(HandshakeError::ModelMismatch {
            expected: expected.model.clone(),
            found: announced_model(bytes),
        });
    }

    // The token fits but a version byte is missing: nothing to compare.
    if bytes.len() <= minor_at {
        return Err(HandshakeError::TooShort {
            received: bytes.len(),
            required: minor_at + 1,
        });
    }

    let found = ProtocolVersion::new(bytes[major_at], bytes[minor_at]);
    if found != expected.version {
        return Err(HandshakeError::VersionMismatch {
            expected: expected.version,
            found,
        });
    }

    let iv = bytes
        .get(minor_at + 1..minor_at + 1 + IV_LENGTH)
        .and_then(|iv| iv.try_into().ok());

    Ok(Greeting {
        model: expected.model.clone(),
        version: found,
        iv,
    })
}

/// Boolean form of `verify_greeting`
pub fn is_supported(bytes: &[u8], expected: &DeviceIdentity) -> bool {
    verify_greeting(bytes, expected).is_ok()
}

/// Best-effort rendering of whatever model the device announced
fn announced_model(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(bytes.len())
        .min(32);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
