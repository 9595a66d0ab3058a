//! Error types for Netlight
//!
//! Provides a unified error type for all operations. Every kind is terminal
//! for the single command being sent.

use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::ProtocolVersion;

/// Result type alias using NetlightError
pub type Result<T> = std::result::Result<T, NetlightError>;

/// Unified error type for Netlight operations
#[derive(Debug, Error)]
pub enum NetlightError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Handshake Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported or unrecognized device: {0}")]
    HandshakeMismatch(#[from] HandshakeError),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ValidationError),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Protocol encoding error: {0}")]
    ProtocolEncoding(String),

    // -------------------------------------------------------------------------
    // Encryption Errors
    // -------------------------------------------------------------------------
    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Cannot read key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a device greeting was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error("greeting too short: received {received} bytes, need at least {required}")]
    TooShort { received: usize, required: usize },

    #[error("expected device model {expected:?}, found {found:?}")]
    ModelMismatch { expected: String, found: String },

    #[error("expected protocol version {expected}, device speaks {found}")]
    VersionMismatch {
        expected: ProtocolVersion,
        found: ProtocolVersion,
    },
}

/// A malformed or inconsistent command parameter
///
/// `field` names the command-line parameter the value came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // -------------------------------------------------------------------------
    // Single-field rules
    // -------------------------------------------------------------------------
    #[error("missing required parameter --{0}")]
    MissingField(&'static str),

    #[error("unknown value {value:?} for parameter --{field}")]
    UnknownSound { field: &'static str, value: String },

    #[error("value {value:?} for parameter --{field} is not an integer or \"continuous\"")]
    InvalidRepeat { field: &'static str, value: String },

    #[error("repeat count {value} for parameter --{field} is outside -1..=15")]
    RepeatOutOfRange { field: &'static str, value: i64 },

    #[error("unit {0:?} is not an integer in 0..=255")]
    InvalidUnit(String),

    #[error("value {value:?} for parameter --{field} is not a RRGGBB hex color")]
    InvalidColor { field: &'static str, value: String },

    #[error("color 0x{0:x} does not fit in 24 bits")]
    ColorOutOfRange(u32),

    #[error("timeout {0:?} is not a number of seconds")]
    InvalidTimeout(String),

    #[error("value {value:?} for parameter --{field} is not a dotted IPv4 address")]
    MalformedAddress { field: &'static str, value: String },

    #[error("octet {index} of --{field} is not a number: {value:?}")]
    MalformedOctet {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("octet {index} of --{field} is out of range 0..=255: {value}")]
    OctetOutOfRange {
        field: &'static str,
        index: usize,
        value: i64,
    },

    #[error("key must be 32 hex digits (16 bytes) long, got {0} characters")]
    KeyLength(usize),

    #[error("key contains a non-hex character at position {0}")]
    KeyDigit(usize),

    #[error("key file must hold at least 16 bytes, found {0}")]
    KeyFileTooShort(usize),

    #[error("label exceeds maximum length of 16 characters ({0})")]
    LabelTooLong(usize),

    #[error("label must be ASCII without nul bytes")]
    LabelNotAscii,

    // -------------------------------------------------------------------------
    // Cross-field rules
    // -------------------------------------------------------------------------
    #[error("a future-color value is required if a timeout is set")]
    FutureColorRequired,

    #[error("a timeout is required if any future value (--{0}) is set")]
    TimeoutRequired(&'static str),

    #[error("specify either --dhcp or the manual network parameters, but not both")]
    NetworkModeConflict,

    #[error("specify either --dhcp or the manual network parameters")]
    NetworkModeMissing,

    #[error("all manual network parameters must be specified (missing --{0})")]
    IncompleteStaticNetwork(&'static str),
}
