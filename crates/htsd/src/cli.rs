//! Command-line arguments

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::BridgeConfig;

#[derive(Parser, Debug)]
#[command(name = "htsd")]
#[command(about = "Forward HTTP POST bodies to a serial device")]
#[command(version)]
pub struct Args {
    /// Serial device to write to (e.g. /dev/ttyUSB0)
    pub device: Option<PathBuf>,

    /// Configuration file path (TOML format)
    /// Command-line options take precedence over the file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to listen on [default: 8008]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(short, long)]
    pub bind: Option<IpAddr>,

    /// Largest accepted POST body in bytes [default: 2097152]
    #[arg(long)]
    pub max_payload: Option<usize>,

    /// Payloads allowed to wait for the device [default: 32]
    #[arg(long)]
    pub queue_depth: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay the options given on the command line onto `config`
    pub fn apply(&self, config: &mut BridgeConfig) {
        if let Some(device) = &self.device {
            config.device.path = Some(device.clone());
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(max_payload) = self.max_payload {
            config.server.max_payload_bytes = max_payload;
        }
        if let Some(queue_depth) = self.queue_depth {
            config.device.queue_depth = queue_depth;
        }
    }
}
