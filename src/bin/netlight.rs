//! Netlight Light-Control Binary
//!
//! Sets the color and sound of one unit, optionally scheduling a future state.

use std::path::PathBuf;

use clap::Parser;
use netlight::config::read_key_file;
use netlight::protocol::LightCommand;
use netlight::{Client, ClientConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Netlight light control
#[derive(Parser, Debug)]
#[command(name = "netlight")]
#[command(about = "Set the state of a light unit on a Netlight device")]
#[command(version)]
struct Args {
    /// Unit number; first unit is 0
    #[arg(short, long)]
    unit: String,

    /// Hex color code to set on the unit (RRGGBB)
    #[arg(short, long)]
    color: String,

    /// none|silence|up|down|short|long|chirp|rise|siren|xmas
    #[arg(short, long)]
    sound: Option<String>,

    /// Number of times to repeat the sound, or "continuous"
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    sound_repeat: Option<String>,

    /// Seconds until the future state applies; required for any future option
    #[arg(short = 'T', long)]
    future_timeout: Option<String>,

    /// Hex color to set when the timeout occurs (RRGGBB)
    #[arg(short = 'C', long)]
    future_color: Option<String>,

    /// Sound to play when the timeout occurs
    #[arg(short = 'S', long)]
    future_sound: Option<String>,

    /// As for --sound-repeat, for the future sound
    #[arg(short = 'R', long, allow_hyphen_values = true)]
    future_sound_repeat: Option<String>,

    /// File containing the device's binary key; required by protocol 2.x devices
    #[arg(short = 'k', long)]
    key_file: Option<PathBuf>,

    /// Device TCP port
    #[arg(long, default_value = "3601")]
    port: u16,

    /// Connect timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Greeting read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    handshake_timeout_ms: u64,

    /// DNS name or address of the device
    address: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,netlight=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let mut builder = LightCommand::builder().unit(args.unit).color(args.color);
    if let Some(sound) = args.sound {
        builder = builder.sound(sound);
    }
    if let Some(repeat) = args.sound_repeat {
        builder = builder.sound_repeat(repeat);
    }
    if let Some(timeout) = args.future_timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(color) = args.future_color {
        builder = builder.future_color(color);
    }
    if let Some(sound) = args.future_sound {
        builder = builder.future_sound(sound);
    }
    if let Some(repeat) = args.future_sound_repeat {
        builder = builder.future_sound_repeat(repeat);
    }

    let command = match builder.build() {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Unit {}: color #{:06x}, sound {}{}",
        command.unit,
        command.color.value(),
        command.sound.sound.name(),
        if command.sound.repeat.is_continuous() {
            " (continuous)"
        } else {
            ""
        }
    );

    let mut config = ClientConfig::builder()
        .port(args.port)
        .connect_timeout_ms(args.connect_timeout_ms)
        .handshake_timeout_ms(args.handshake_timeout_ms);
    if let Some(path) = args.key_file {
        match read_key_file(&path) {
            Ok(key) => config = config.key(key),
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
    let config = config.build();

    if let Err(e) = Client::new(config).send_light(&args.address, &command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
