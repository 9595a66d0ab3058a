//! Builder Module
//!
//! Translates loosely typed input (command-line tokens and flags) into
//! validated protocol commands.
//!
//! ## Responsibilities
//! - Parse each token, naming the parameter on failure
//! - Enforce the cross-field rules no single token can check:
//!   - light: a nonzero timeout needs a future color, future values need a timeout
//!   - configuration: DHCP or all four manual addresses, never both
//! - Never touch the network: a builder error means nothing was sent

mod parse;
mod light;
mod device_config;

pub use parse::{
    parse_color, parse_ipv4, parse_key, parse_label, parse_repeat, parse_sound, parse_timeout,
    parse_unit, CONTINUOUS,
};
pub use light::LightCommandBuilder;
pub use device_config::ConfigCommandBuilder;
