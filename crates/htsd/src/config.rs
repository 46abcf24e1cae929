//! Daemon configuration
//!
//! Loaded from an optional TOML file, then overridden by command-line
//! arguments. Every field has a default except the device path, which must
//! come from one of the two.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use hts_api::DEFAULT_MAX_PAYLOAD_BYTES;
use hts_device::DeviceConfig;
use serde::{Deserialize, Serialize};

/// Port the bridge listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 8008;

/// Complete daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Serial device settings
    #[serde(default)]
    pub device: DeviceConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (all interfaces by default)
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest POST body accepted
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Socket address to listen on
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind, self.server.port)
    }

    /// Device path to write to; fails if neither the CLI nor the file gave one
    pub fn device_path(&self) -> Result<&Path> {
        self.device.path.as_deref().context(
            "No serial device given: pass the device path as an argument or set device.path in the config file",
        )
    }
}
