//! Netlight Configuration Binary
//!
//! Changes the network settings, label and encryption key of a device.

use std::path::PathBuf;

use clap::Parser;
use netlight::config::read_key_file;
use netlight::protocol::ConfigCommand;
use netlight::{Client, ClientConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Netlight device configuration
#[derive(Parser, Debug)]
#[command(name = "netlight-config")]
#[command(about = "Configure the network settings of a Netlight device")]
#[command(version)]
struct Args {
    /// Use DHCP for network config
    #[arg(short, long)]
    dhcp: bool,

    /// Static IP address
    #[arg(short, long)]
    address: Option<String>,

    /// Network address mask
    #[arg(short, long)]
    mask: Option<String>,

    /// Network gateway address
    #[arg(short, long)]
    gateway: Option<String>,

    /// Network nameserver address
    #[arg(short, long)]
    nameserver: Option<String>,

    /// mDNS name (16 chars max, base name only)
    #[arg(short, long)]
    label: Option<String>,

    /// AES key, 32 hex digits; all zeros disables encryption
    #[arg(short, long)]
    key: Option<String>,

    /// File holding the device's current binary key; required by protocol 2.x devices
    #[arg(long)]
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
    target: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,netlight=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let mut builder = ConfigCommand::builder().dhcp(args.dhcp);
    if let Some(address) = args.address {
        builder = builder.address(address);
    }
    if let Some(mask) = args.mask {
        builder = builder.netmask(mask);
    }
    if let Some(gateway) = args.gateway {
        builder = builder.gateway(gateway);
    }
    if let Some(nameserver) = args.nameserver {
        builder = builder.nameserver(nameserver);
    }
    if let Some(label) = args.label {
        builder = builder.label(label);
    }
    if let Some(key) = args.key {
        builder = builder.key(key);
    }

    let command = match builder.build() {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "DHCP: {}, label: {}",
        matches!(command.network, netlight::protocol::NetworkMode::Dhcp),
        command.label.as_ref().map_or("(unchanged)", |l| l.as_str())
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

    if let Err(e) = Client::new(config).send_config(&args.target, &command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
