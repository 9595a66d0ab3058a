//! # Netlight
//!
//! Command and configuration client for networked indicator lights:
//! - Device identification handshake (model token + protocol version)
//! - Light-control frames: color, sound, and a scheduled future state
//! - Device-configuration frames: network settings, label, encryption key
//! - Encrypted framing for protocol 2.x devices (AES-128-CBC)
//! - Validation of every parameter before any network I/O
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CLI (netlight, netlight-config)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ raw tokens
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Builders                          │
//! │              (parse + cross-field validation)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Frame Codec │          │  Handshake  │
//!   │  (encode)   │          │  (verify)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!              ┌───────────────┐
//!              │   Transport   │
//!              │ (TCP :3601)   │
//!              └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod builder;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HandshakeError, NetlightError, Result, ValidationError};
pub use config::ClientConfig;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Netlight
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
