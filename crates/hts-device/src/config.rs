//! Device configuration
//!
//! This is the `[device]` table of the daemon's config file. The path may
//! be left out there because the command line can supply it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of payloads that may wait for the device
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Configuration for the serial device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Filesystem path of the serial device (e.g. "/dev/ttyUSB0")
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Capacity of the write queue in front of the device
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: None,
            queue_depth: default_queue_depth(),
        }
    }
}
