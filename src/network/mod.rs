//! Network Module
//!
//! TCP transport and device sessions.
//!
//! ## Architecture
//! - Fully synchronous: connect, one read, one write, close
//! - `Transport` is the seam between the session and the socket
//! - The socket is released on every exit path

mod transport;
mod connection;
mod session;

pub use transport::Transport;
pub use connection::TcpTransport;
pub use session::Session;
