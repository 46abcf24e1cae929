//! Device error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for device operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while writing to the device
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device path could not be opened for writing
    #[error("Failed to open device {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Device was opened but the write (or flush) failed
    #[error("Failed to write to device {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure injected by the mock device
    #[error("Injected device failure: {0}")]
    Injected(String),

    /// The writer task is gone (shutdown in progress)
    #[error("Device writer is not running")]
    WriterClosed,

    /// Blocking I/O task panicked or was cancelled
    #[error("Device task failed: {0}")]
    Join(String),
}

impl DeviceError {
    /// True for errors raised by the device itself, as opposed to the
    /// writer machinery around it
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            DeviceError::Open { .. } | DeviceError::Write { .. } | DeviceError::Injected(_)
        )
    }
}
