//! Transport abstraction
//!
//! The byte pipe a session runs over. TCP in production, in-memory in tests.

use crate::error::Result;

/// Blocking, connection-oriented byte transport
pub trait Transport {
    /// Receive whatever is available in a single read; 0 means the peer closed
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Send every byte or fail
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Release the connection; calling it twice is harmless
    fn close(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(buf)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).send(bytes)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
