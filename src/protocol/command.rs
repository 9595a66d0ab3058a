//! Command definitions
//!
//! Represents the commands a client sends and the named wire constants
//! shared by both frame variants.

use std::fmt;

use bytes::Bytes;

use crate::error::Result;
use super::codec::{encode_config_frame, encode_light_frame};
use super::{ConfigCommand, LightCommand};

/// First byte of every client-to-device frame
pub const FRAME_MARKER: u8 = 0x17;

/// Function codes that open a light-control payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FunctionCode {
    SetLight = 0x00,
}

/// Tags that prefix each field of a device-configuration payload
///
/// Fields are emitted in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConfigTag {
    IpAddress = 255,
    Netmask = 254,
    Gateway = 253,
    DnsServer = 252,
    Label = 251,
    AesKey = 250,
}

/// Protocol version carried in the greeting and in every frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    /// The only version this client speaks
    pub const CURRENT: ProtocolVersion = ProtocolVersion { major: 1, minor: 0 };

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// What a device must announce in its greeting to be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Model token, compared case-sensitively
    pub model: String,

    /// Required protocol version
    pub version: ProtocolVersion,
}

impl DeviceIdentity {
    pub fn new(model: impl Into<String>, version: ProtocolVersion) -> Self {
        Self {
            model: model.into(),
            version,
        }
    }
}

/// A validated command, ready to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the state of one light unit
    Light(LightCommand),

    /// Change network, label or encryption settings
    Configure(ConfigCommand),
}

impl Command {
    /// Encode the command as a complete frame
    pub fn encode(&self, version: ProtocolVersion) -> Result<Bytes> {
        match self {
            Command::Light(light) => encode_light_frame(version, light),
            Command::Configure(config) => encode_config_frame(version, config),
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Light(_) => "set-light",
            Command::Configure(_) => "configure",
        }
    }
}

impl From<LightCommand> for Command {
    fn from(command: LightCommand) -> Self {
        Command::Light(command)
    }
}

impl From<ConfigCommand> for Command {
    fn from(command: ConfigCommand) -> Self {
        Command::Configure(command)
    }
}
