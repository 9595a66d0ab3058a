//! Device-configuration parameters
//!
//! Network mode, mDNS/LLMNR label and encryption key for the configuration
//! command.

use std::net::Ipv4Addr;

use crate::error::ValidationError;

/// Longest label the device accepts, excluding the trailing nul
pub const MAX_LABEL_LENGTH: usize = 16;

/// Symmetric key size in bytes
pub const KEY_LENGTH: usize = 16;

/// Manually assigned IPv4 settings; always complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticNetwork {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub nameserver: Ipv4Addr,
}

/// How the device obtains its address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    Dhcp,
    Static(StaticNetwork),
}

/// Device name announced over mDNS / LLMNR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if !label.is_ascii() || label.contains('\0') {
            return Err(ValidationError::LabelNotAscii);
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(ValidationError::LabelTooLong(label.len()));
        }
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// AES-128 key; all zeros disables encryption
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct AesKey([u8; KEY_LENGTH]);

impl AesKey {
    pub const DISABLED: AesKey = AesKey([0; KEY_LENGTH]);

    pub fn new(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    pub fn is_disabled(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

// Keep key material out of logs.
impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_disabled() {
            f.write_str("AesKey(disabled)")
        } else {
            f.write_str("AesKey(..)")
        }
    }
}

/// Parameters of a device-configuration command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCommand {
    pub network: NetworkMode,
    pub label: Option<Label>,
    pub key: Option<AesKey>,
}

impl ConfigCommand {
    pub fn new(network: NetworkMode) -> Self {
        Self {
            network,
            label: None,
            key: None,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_key(mut self, key: AesKey) -> Self {
        self.key = Some(key);
        self
    }
}
