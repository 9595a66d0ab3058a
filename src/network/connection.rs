//! TCP Connection
//!
//! Connects to a device and provides the raw byte transport.

use std::io::{self, Read};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::Result;
use crate::protocol::write_encoded;
use super::Transport;

/// A TCP connection to one device
///
/// The socket is shut down when the value is dropped, so every early return
/// releases it.
pub struct TcpTransport {
    /// TCP stream
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,

    /// Set once the socket has been shut down
    closed: bool,
}

impl TcpTransport {
    /// Resolve `host` and connect to the first address that accepts
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self> {
        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such host: {}", host),
            )
            .into());
        }

        let mut last_error = None;
        for addr in addrs {
            tracing::debug!("Connecting to {}", addr);
            let attempt = match timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no address connected"))
            .into())
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        // Get peer address for logging
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // The frame goes out in one write; don't let Nagle hold it back
        stream.set_nodelay(true)?;

        Ok(Self {
            stream,
            peer_addr,
            closed: false,
        })
    }

    /// Configure read and write deadlines; `None` blocks indefinitely
    pub fn set_timeouts(&mut self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(read)?;
        self.stream.set_write_timeout(write)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.stream.read(buf)?)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        write_encoded(&mut self.stream, bytes)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::debug!("Closing connection to {}", self.peer_addr);
        match self.stream.shutdown(Shutdown::Both) {
            // The device may hang up first once it has the frame
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => Ok(other?),
        }
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::debug!("Error closing connection to {}: {}", self.peer_addr, e);
        }
    }
}
