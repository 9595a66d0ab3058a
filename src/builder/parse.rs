//! Token parsers
//!
//! Turn single command-line tokens into typed protocol values. Each parser
//! reports the parameter it was parsing so errors point at the bad flag.

use std::net::Ipv4Addr;

use crate::error::ValidationError;
use crate::protocol::{AesKey, Color, Label, Sound, SoundRepeat, KEY_LENGTH};

/// Token that selects a continuously repeating sound
pub const CONTINUOUS: &str = "continuous";

/// Parse a sound name (`none`, `silence`, ... `xmas`)
pub fn parse_sound(token: &str, field: &'static str) -> Result<Sound, ValidationError> {
    Sound::from_name(token).ok_or_else(|| ValidationError::UnknownSound {
        field,
        value: token.to_string(),
    })
}

/// Parse a repeat count or `continuous`
pub fn parse_repeat(token: &str, field: &'static str) -> Result<SoundRepeat, ValidationError> {
    if token == CONTINUOUS {
        return Ok(SoundRepeat::CONTINUOUS);
    }
    let count: i64 = token.parse().map_err(|_| ValidationError::InvalidRepeat {
        field,
        value: token.to_string(),
    })?;
    SoundRepeat::new(count, field)
}

/// Parse a `RRGGBB` hex color, with or without a leading `#`
pub fn parse_color(token: &str, field: &'static str) -> Result<Color, ValidationError> {
    let invalid = || ValidationError::InvalidColor {
        field,
        value: token.to_string(),
    };

    let digits = token.strip_prefix('#').unwrap_or(token);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Color::new(rgb)
}

/// Parse a zero-based unit index that fits the one-byte wire field
pub fn parse_unit(token: &str) -> Result<u8, ValidationError> {
    token
        .parse()
        .map_err(|_| ValidationError::InvalidUnit(token.to_string()))
}

/// Parse a timeout in whole seconds
pub fn parse_timeout(token: &str) -> Result<u32, ValidationError> {
    token
        .parse()
        .map_err(|_| ValidationError::InvalidTimeout(token.to_string()))
}

/// Parse a dotted-quad IPv4 address, reporting the offending octet
pub fn parse_ipv4(token: &str, field: &'static str) -> Result<Ipv4Addr, ValidationError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 4 {
        return Err(ValidationError::MalformedAddress {
            field,
            value: token.to_string(),
        });
    }

    let mut octets = [0u8; 4];
    for (index, part) in parts.into_iter().enumerate() {
        let value: i64 = part.parse().map_err(|_| ValidationError::MalformedOctet {
            field,
            index,
            value: part.to_string(),
        })?;
        octets[index] = u8::try_from(value)
            .map_err(|_| ValidationError::OctetOutOfRange { field, index, value })?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Parse a key written as 32 hex digits
pub fn parse_key(token: &str) -> Result<AesKey, ValidationError> {
    if token.len() != KEY_LENGTH * 2 {
        return Err(ValidationError::KeyLength(token.chars().count()));
    }
    if let Some(position) = token.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(ValidationError::KeyDigit(position));
    }

    let mut key = [0u8; KEY_LENGTH];
    for (i, byte) in key.iter_mut().enumerate() {
        let pair = &token[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16).map_err(|_| ValidationError::KeyDigit(i * 2))?;
    }

    Ok(AesKey::new(key))
}

/// Parse an mDNS / LLMNR label
pub fn parse_label(token: &str) -> Result<Label, ValidationError> {
    Label::new(token)
}
