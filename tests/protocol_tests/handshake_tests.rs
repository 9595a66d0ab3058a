//! Handshake Tests
//!
//! Tests for greeting verification against the expected device identity.

use netlight::protocol::{is_supported, verify_greeting, DeviceIdentity, ProtocolVersion};
use netlight::HandshakeError;

fn nl5() -> DeviceIdentity {
    DeviceIdentity::new("NL5", ProtocolVersion::new(1, 0))
}

fn greeting(model: &[u8], major: u8, minor: u8) -> Vec<u8> {
    let mut bytes = model.to_vec();
    bytes.push(0x00);
    bytes.push(major);
    bytes.push(minor);
    bytes.extend((0u8..16).map(|i| i.wrapping_mul(37)));
    bytes
}

// =============================================================================
// Accepted Greetings
// =============================================================================

#[test]
fn test_accepts_matching_greeting() {
    let bytes = greeting(b"NL5", 1, 0);
    let accepted = verify_greeting(&bytes, &nl5()).unwrap();

    assert_eq!(accepted.model, "NL5");
    assert_eq!(accepted.version, ProtocolVersion::new(1, 0));
    assert_eq!(accepted.iv.unwrap().as_slice(), &bytes[6..22]);
    assert!(is_supported(&bytes, &nl5()));
}

#[test]
fn test_accepts_greeting_without_random_block() {
    let accepted = verify_greeting(b"NL5\x00\x01\x00", &nl5()).unwrap();
    assert_eq!(accepted.iv, None);
}

#[test]
fn test_separator_byte_is_not_inspected() {
    let mut bytes = greeting(b"NL5", 1, 0);
    bytes[3] = b'#';
    assert!(is_supported(&bytes, &nl5()));
}

#[test]
fn test_trailing_bytes_after_token_are_ignored() {
    // Only the token prefix is compared; the version sits at a fixed offset
    let bytes = b"NL5X\x01\x00";
    assert!(is_supported(bytes, &nl5()));
}

// =============================================================================
// Rejected Greetings
// =============================================================================

#[test]
fn test_rejects_wrong_major() {
    let bytes = greeting(b"NL5", 2, 0);
    assert_eq!(
        verify_greeting(&bytes, &nl5()),
        Err(HandshakeError::VersionMismatch {
            expected: ProtocolVersion::new(1, 0),
            found: ProtocolVersion::new(2, 0),
        })
    );
}

#[test]
fn test_rejects_wrong_minor() {
    let bytes = greeting(b"NL5", 1, 1);
    assert!(matches!(
        verify_greeting(&bytes, &nl5()),
        Err(HandshakeError::VersionMismatch { .. })
    ));
}

#[test]
fn test_rejects_wrong_model() {
    let bytes = greeting(b"NL4", 1, 0);
    assert_eq!(
        verify_greeting(&bytes, &nl5()),
        Err(HandshakeError::ModelMismatch {
            expected: "NL5".to_string(),
            found: "NL4".to_string(),
        })
    );
}

#[test]
fn test_model_comparison_is_case_sensitive() {
    let bytes = greeting(b"nl5", 1, 0);
    assert!(!is_supported(&bytes, &nl5()));
}

#[test]
fn test_rejects_empty_greeting() {
    assert_eq!(
        verify_greeting(&[], &nl5()),
        Err(HandshakeError::TooShort {
            received: 0,
            required: 4,
        })
    );
}

#[test]
fn test_rejects_token_only() {
    // Exactly len(token) bytes is one short of the minimum
    assert!(matches!(
        verify_greeting(b"NL5", &nl5()),
        Err(HandshakeError::TooShort { received: 3, .. })
    ));
}

#[test]
fn test_rejects_missing_version_bytes() {
    assert!(matches!(
        verify_greeting(b"NL5\x00\x01", &nl5()),
        Err(HandshakeError::TooShort { received: 5, required: 6 })
    ));
}

#[test]
fn test_longer_model_token() {
    let identity = DeviceIdentity::new("NL10", ProtocolVersion::new(1, 0));
    let bytes = greeting(b"NL10", 1, 0);
    assert!(is_supported(&bytes, &identity));
    assert!(!is_supported(&greeting(b"NL5", 1, 0), &identity));
}
