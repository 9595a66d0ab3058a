//! Device Session
//!
//! One connection, one greeting, one frame. A session only exists once the
//! device has identified itself as supported.

use crate::error::{NetlightError, Result};
use crate::protocol::handshake::GREETING_BUFFER_SIZE;
use crate::protocol::{verify_greeting, DeviceIdentity, Greeting};
use super::Transport;

/// A verified connection to a supported device
pub struct Session<T: Transport> {
    transport: T,
    greeting: Greeting,
}

impl<T: Transport> Session<T> {
    /// Read the greeting in a single receive and verify it
    ///
    /// The transport is closed before any error is returned.
    pub fn establish(mut transport: T, expected: &DeviceIdentity) -> Result<Self> {
        let mut buffer = [0u8; GREETING_BUFFER_SIZE];

        let greeting = transport
            .receive(&mut buffer)
            .and_then(|received| {
                tracing::debug!("Received {} byte greeting", received);
                verify_greeting(&buffer[..received], expected).map_err(NetlightError::from)
            });

        match greeting {
            Ok(greeting) => {
                tracing::info!(
                    "Found device {}, protocol version {}",
                    greeting.model,
                    greeting.version
                );
                Ok(Self {
                    transport,
                    greeting,
                })
            }
            Err(e) => {
                release(&mut transport);
                Err(e)
            }
        }
    }

    /// The greeting the device sent
    pub fn greeting(&self) -> &Greeting {
        &self.greeting
    }

    /// Write one encoded frame
    pub fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        tracing::debug!("Sending {} byte frame", frame.len());
        self.transport.send(frame)
    }

    /// Close the connection and hand back the greeting
    pub fn close(mut self) -> Greeting {
        release(&mut self.transport);
        self.greeting
    }
}

/// Close a transport; the command outcome is already decided, so failures are only logged
fn release<T: Transport>(transport: &mut T) {
    if let Err(e) = transport.close() {
        tracing::warn!("Failed to close connection: {}", e);
    }
}
