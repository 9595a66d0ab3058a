//! Protocol Module
//!
//! Defines the wire protocol spoken with a device on TCP port 3601.
//!
//! ## Session
//! 1. Device sends a greeting: model token, separator, protocol major and
//!    minor, 16 random bytes.
//! 2. Client sends exactly one frame and closes the connection.
//!
//! ### Frame Format
//! ```text
//! ┌──────────┬──────────┬──────────┬────────────┬─────────────────────┐
//! │ 0x17 (1) │ Major(1) │ Minor(1) │ Len (2 LE) │       Payload       │
//! └──────────┴──────────┴──────────┴────────────┴─────────────────────┘
//! ```
//!
//! ### Payloads
//! - Light control: fixed 14 bytes, function code 0
//! - Device configuration: tagged fields 255..250
//!
//! From protocol major 2 the payload is encrypted (see [`cipher`]).

mod command;
mod light;
mod settings;
pub mod cipher;
pub mod codec;
pub mod handshake;

pub use command::{
    Command, ConfigTag, DeviceIdentity, FunctionCode, ProtocolVersion, FRAME_MARKER,
};
pub use light::{Color, LightCommand, ScheduledState, Sound, SoundCue, SoundRepeat};
pub use settings::{
    AesKey, ConfigCommand, Label, NetworkMode, StaticNetwork, KEY_LENGTH, MAX_LABEL_LENGTH,
};
pub use codec::{
    encode_config_frame, encode_frame, encode_light_frame, write_encoded, write_frame, HEADER_SIZE,
};
pub use cipher::{requires_encryption, FrameCipher};
pub use handshake::{is_supported, verify_greeting, Greeting};
