//! Protocol codec
//!
//! Encoding functions for the client-to-device frames. The device never
//! replies after the greeting, so there is nothing to decode here.
//!
//! ## Wire Format
//!
//! ### Frame
//! ```text
//! ┌────────────┬──────────┬──────────┬────────────┬──────────────────┐
//! │ 0x17 (1)   │ Major(1) │ Minor(1) │ Len (2 LE) │     Payload      │
//! └────────────┴──────────┴──────────┴────────────┴──────────────────┘
//! ```
//! `Len` counts payload bytes only.
//!
//! ### Light-control payload (always 14 bytes)
//! ```text
//! fn(1)=0 │ unit(1) │ R G B │ sound(1) │ timeout(4 LE) │ R G B │ sound(1)
//! ```
//! A sound byte carries the sound code in the low nibble and the repeat
//! count in the high nibble.
//!
//! ### Device-configuration payload
//! A sequence of `tag(1) value` fields in the order
//! 255 address, 254 netmask, 253 gateway, 252 DNS (4 bytes each),
//! 251 label (ASCII + nul), 250 key (16 bytes).

use std::io::Write;
use std::net::Ipv4Addr;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{NetlightError, Result};
use super::{
    Color, Command, ConfigCommand, ConfigTag, FunctionCode, LightCommand, NetworkMode, ProtocolVersion,
    FRAME_MARKER, KEY_LENGTH, MAX_LABEL_LENGTH,
};

/// Header size: marker (1) + version (2) + payload length (2)
pub const HEADER_SIZE: usize = 5;

/// Payload size of every light-control frame
pub const LIGHT_PAYLOAD_SIZE: usize = 14;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// Largest possible configuration payload
const MAX_CONFIG_PAYLOAD_SIZE: usize = 4 * (1 + 4) + (1 + MAX_LABEL_LENGTH + 1) + (1 + KEY_LENGTH);

// =============================================================================
// Frame Encoding
// =============================================================================

/// Wrap a payload in a frame header
///
/// Format: 0x17 + major + minor + payload_len (u16 LE) + payload
pub fn encode_frame(version: ProtocolVersion, payload: &[u8]) -> Result<Bytes> {
    let payload_len = u16::try_from(payload.len()).map_err(|_| {
        NetlightError::ProtocolEncoding(format!(
            "Payload too large: {} bytes (max {})",
            payload.len(),
            MAX_PAYLOAD_SIZE
        ))
    })?;

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u8(FRAME_MARKER);
    frame.put_u8(version.major);
    frame.put_u8(version.minor);
    frame.put_u16_le(payload_len);
    frame.put_slice(payload);

    Ok(frame.freeze())
}

/// Encode a "set light" command as a complete frame
pub fn encode_light_frame(version: ProtocolVersion, command: &LightCommand) -> Result<Bytes> {
    let (future_color, future_sound) = match command.schedule {
        Some(schedule) => (schedule.color, schedule.sound.to_wire()),
        None => (Color::BLACK, 0),
    };

    let mut payload = BytesMut::with_capacity(LIGHT_PAYLOAD_SIZE);
    payload.put_u8(FunctionCode::SetLight as u8);
    payload.put_u8(command.unit);
    put_color(&mut payload, command.color);
    payload.put_u8(command.sound.to_wire());
    payload.put_u32_le(command.timeout_secs());
    put_color(&mut payload, future_color);
    payload.put_u8(future_sound);

    if payload.len() != LIGHT_PAYLOAD_SIZE {
        return Err(NetlightError::ProtocolEncoding(format!(
            "Light payload is {} bytes, expected {}",
            payload.len(),
            LIGHT_PAYLOAD_SIZE
        )));
    }

    encode_frame(version, &payload)
}

/// Encode a device-configuration command as a complete frame
///
/// DHCP omits the four address fields; an all-zero key omits the key field.
pub fn encode_config_frame(version: ProtocolVersion, command: &ConfigCommand) -> Result<Bytes> {
    let mut payload = BytesMut::with_capacity(MAX_CONFIG_PAYLOAD_SIZE);

    if let NetworkMode::Static(network) = &command.network {
        put_address(&mut payload, ConfigTag::IpAddress, network.address);
        put_address(&mut payload, ConfigTag::Netmask, network.netmask);
        put_address(&mut payload, ConfigTag::Gateway, network.gateway);
        put_address(&mut payload, ConfigTag::DnsServer, network.nameserver);
    }

    if let Some(label) = &command.label {
        if label.as_bytes().len() > MAX_LABEL_LENGTH {
            return Err(NetlightError::ProtocolEncoding(format!(
                "Label is {} bytes (max {})",
                label.as_bytes().len(),
                MAX_LABEL_LENGTH
            )));
        }
        payload.put_u8(ConfigTag::Label as u8);
        payload.put_slice(label.as_bytes());
        payload.put_u8(0);
    }

    if let Some(key) = command.key.filter(|key| !key.is_disabled()) {
        payload.put_u8(ConfigTag::AesKey as u8);
        payload.put_slice(key.as_bytes());
    }

    encode_frame(version, &payload)
}

// =============================================================================
// Stream Writing
// =============================================================================

/// Encode a command and write it to a stream as one frame
pub fn write_frame<W: Write>(
    writer: &mut W,
    version: ProtocolVersion,
    command: &Command,
) -> Result<()> {
    let frame = command.encode(version)?;
    write_encoded(writer, &frame)
}

/// Write an already encoded frame to a stream
pub fn write_encoded<W: Write>(writer: &mut W, frame: &[u8]) -> Result<()> {
    writer.write_all(frame)?;
    writer.flush()?;
    Ok(())
}

fn put_color(buf: &mut BytesMut, color: Color) {
    buf.put_u8(color.red());
    buf.put_u8(color.green());
    buf.put_u8(color.blue());
}

fn put_address(buf: &mut BytesMut, tag: ConfigTag, address: Ipv4Addr) {
    buf.put_u8(tag as u8);
    buf.put_slice(&address.octets());
}
