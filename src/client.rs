//! Client Module
//!
//! Sends one command to one device.
//!
//! ## Flow
//! 1. Encode the frame (fails before any I/O)
//! 2. Resolve and connect
//! 3. Read and verify the greeting
//! 4. Encrypt the payload if the device speaks protocol 2.x
//! 5. Write the frame
//! 6. Close

use std::borrow::Cow;

use crate::config::ClientConfig;
use crate::error::{NetlightError, Result};
use crate::network::{Session, TcpTransport, Transport};
use crate::protocol::{
    requires_encryption, Command, ConfigCommand, FrameCipher, Greeting, LightCommand,
};

/// Client for sending commands to devices
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a command to the device at `host`
    ///
    /// Returns the greeting of the device that accepted the command.
    pub fn send(&self, host: &str, command: &Command) -> Result<Greeting> {
        let frame = command.encode(self.config.identity.version)?;
        tracing::debug!(
            "Encoded {} frame: {} bytes",
            command.name(),
            frame.len()
        );

        let transport = self.connect(host)?;
        let greeting = self.deliver(transport, &frame)?;
        tracing::info!("Sent {} command to {}", command.name(), host);
        Ok(greeting)
    }

    /// Send a "set light" command
    pub fn send_light(&self, host: &str, command: &LightCommand) -> Result<Greeting> {
        self.send(host, &Command::Light(*command))
    }

    /// Send a device-configuration command
    pub fn send_config(&self, host: &str, command: &ConfigCommand) -> Result<Greeting> {
        self.send(host, &Command::Configure(command.clone()))
    }

    /// Open a TCP connection with the configured deadlines applied
    pub fn connect(&self, host: &str) -> Result<TcpTransport> {
        let mut transport =
            TcpTransport::connect(host, self.config.port, self.config.connect_timeout())?;
        transport.set_timeouts(self.config.handshake_timeout(), self.config.write_timeout())?;
        tracing::debug!("Connected to {}", transport.peer_addr());
        Ok(transport)
    }

    /// Run the handshake and write an encoded frame over any transport
    ///
    /// The transport is closed on every path.
    pub fn deliver<T: Transport>(&self, transport: T, frame: &[u8]) -> Result<Greeting> {
        let mut session = Session::establish(transport, &self.config.identity)?;
        let sent = self
            .seal(session.greeting(), frame)
            .and_then(|frame| session.send_frame(&frame));
        let greeting = session.close();
        sent.map(|_| greeting)
    }

    /// Encrypt the frame when the device's protocol requires it
    fn seal<'a>(&self, greeting: &Greeting, frame: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        if !requires_encryption(greeting.version) {
            return Ok(Cow::Borrowed(frame));
        }

        let key = self.config.key.as_ref().ok_or_else(|| {
            NetlightError::Encryption(format!(
                "protocol {} requires a device key",
                greeting.version
            ))
        })?;
        let iv = greeting.iv.as_ref().ok_or_else(|| {
            NetlightError::Encryption("greeting carried no IV".to_string())
        })?;

        tracing::debug!("Encrypting frame for protocol {}", greeting.version);
        let sealed = FrameCipher::new(key, iv).seal(frame)?;
        Ok(Cow::Owned(sealed.to_vec()))
    }
}
