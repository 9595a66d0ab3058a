//! Configuration for Netlight
//!
//! Centralized client configuration with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{NetlightError, Result, ValidationError};
use crate::protocol::{AesKey, DeviceIdentity, ProtocolVersion, KEY_LENGTH};

/// TCP port every device listens on
pub const DEFAULT_PORT: u16 = 3601;

/// Model token announced by supported devices
pub const DEFAULT_MODEL: &str = "NL5";

/// Main configuration for a Netlight client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// TCP port the device listens on
    pub port: u16,

    /// Model token and protocol version the greeting must announce.
    /// The same version is written into every outgoing frame header.
    pub identity: DeviceIdentity,

    /// Device key used to encrypt frames for protocol 2.x devices
    pub key: Option<AesKey>,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Greeting read timeout (milliseconds, 0 = block until the device writes)
    pub handshake_timeout_ms: u64,

    /// Frame write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            identity: DeviceIdentity::new(DEFAULT_MODEL, ProtocolVersion::CURRENT),
            key: None,
            connect_timeout_ms: 5000,
            handshake_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Connect timeout, `None` when disabled
    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    /// Greeting read timeout, `None` when disabled
    pub fn handshake_timeout(&self) -> Option<Duration> {
        millis(self.handshake_timeout_ms)
    }

    /// Frame write timeout, `None` when disabled
    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

/// Load a binary device key; only the first 16 bytes of the file are used
pub fn read_key_file(path: impl AsRef<Path>) -> Result<AesKey> {
    let path = path.as_ref();
    let contents = fs::read(path).map_err(|source| NetlightError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes: [u8; KEY_LENGTH] = contents
        .get(..KEY_LENGTH)
        .and_then(|key| key.try_into().ok())
        .ok_or(ValidationError::KeyFileTooShort(contents.len()))?;
    Ok(AesKey::new(bytes))
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the device TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the expected device model token
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.identity.model = model.into();
        self
    }

    /// Set the protocol version to require and to send
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.config.identity.version = version;
        self
    }

    /// Set the device key for encrypted framing
    pub fn key(mut self, key: AesKey) -> Self {
        self.config.key = Some(key);
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the greeting read timeout (in milliseconds)
    pub fn handshake_timeout_ms(mut self, ms: u64) -> Self {
        self.config.handshake_timeout_ms = ms;
        self
    }

    /// Set the frame write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
