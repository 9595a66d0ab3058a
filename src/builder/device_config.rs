//! Device-configuration command builder

use crate::error::ValidationError;
use crate::protocol::{ConfigCommand, NetworkMode, StaticNetwork};
use super::parse::{parse_ipv4, parse_key, parse_label};

/// Collects raw tokens for a configuration command and validates them together
#[derive(Debug, Default, Clone)]
pub struct ConfigCommandBuilder {
    dhcp: bool,
    address: Option<String>,
    netmask: Option<String>,
    gateway: Option<String>,
    nameserver: Option<String>,
    label: Option<String>,
    key: Option<String>,
}

impl ConfigCommand {
    /// Create a new command builder
    pub fn builder() -> ConfigCommandBuilder {
        ConfigCommandBuilder::default()
    }
}

impl ConfigCommandBuilder {
    /// Request DHCP instead of a static address
    pub fn dhcp(mut self, enabled: bool) -> Self {
        self.dhcp = enabled;
        self
    }

    /// Set the static IPv4 address
    pub fn address(mut self, token: impl Into<String>) -> Self {
        self.address = Some(token.into());
        self
    }

    /// Set the network mask
    pub fn netmask(mut self, token: impl Into<String>) -> Self {
        self.netmask = Some(token.into());
        self
    }

    /// Set the default gateway
    pub fn gateway(mut self, token: impl Into<String>) -> Self {
        self.gateway = Some(token.into());
        self
    }

    /// Set the DNS server
    pub fn nameserver(mut self, token: impl Into<String>) -> Self {
        self.nameserver = Some(token.into());
        self
    }

    /// Set the mDNS / LLMNR label (16 characters max)
    pub fn label(mut self, token: impl Into<String>) -> Self {
        self.label = Some(token.into());
        self
    }

    /// Set the key as 32 hex digits; all zeros disables encryption
    pub fn key(mut self, token: impl Into<String>) -> Self {
        self.key = Some(token.into());
        self
    }

    /// Validate every token and the choice of network mode
    pub fn build(&self) -> Result<ConfigCommand, ValidationError> {
        let address = self.address.as_deref().map(|t| parse_ipv4(t, "address")).transpose()?;
        let netmask = self.netmask.as_deref().map(|t| parse_ipv4(t, "mask")).transpose()?;
        let gateway = self.gateway.as_deref().map(|t| parse_ipv4(t, "gateway")).transpose()?;
        let nameserver = self
            .nameserver
            .as_deref()
            .map(|t| parse_ipv4(t, "nameserver"))
            .transpose()?;
        let label = self.label.as_deref().map(parse_label).transpose()?;
        let key = self.key.as_deref().map(parse_key).transpose()?;

        let any_manual =
            address.is_some() || netmask.is_some() || gateway.is_some() || nameserver.is_some();

        let network = match (self.dhcp, any_manual) {
            (true, true) => return Err(ValidationError::NetworkModeConflict),
            (false, false) => return Err(ValidationError::NetworkModeMissing),
            (true, false) => NetworkMode::Dhcp,
            (false, true) => NetworkMode::Static(StaticNetwork {
                address: address.ok_or(ValidationError::IncompleteStaticNetwork("address"))?,
                netmask: netmask.ok_or(ValidationError::IncompleteStaticNetwork("mask"))?,
                gateway: gateway.ok_or(ValidationError::IncompleteStaticNetwork("gateway"))?,
                nameserver: nameserver
                    .ok_or(ValidationError::IncompleteStaticNetwork("nameserver"))?,
            }),
        };

        Ok(ConfigCommand {
            network,
            label,
            key,
        })
    }
}
