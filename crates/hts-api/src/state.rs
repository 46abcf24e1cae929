//! Application state for the bridge API

use hts_device::DeviceWriter;

/// Largest request body accepted by default (2 MiB)
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle to the task that owns the device
    writer: DeviceWriter,
    /// Upper bound on the declared Content-Length of a POST
    max_payload_bytes: usize,
}

impl AppState {
    /// Create a new AppState with the default payload limit
    pub fn new(writer: DeviceWriter) -> Self {
        Self::with_max_payload(writer, DEFAULT_MAX_PAYLOAD_BYTES)
    }

    /// Create a new AppState with an explicit payload limit
    pub fn with_max_payload(writer: DeviceWriter, max_payload_bytes: usize) -> Self {
        Self {
            writer,
            max_payload_bytes,
        }
    }

    /// Get the device writer
    pub fn writer(&self) -> &DeviceWriter {
        &self.writer
    }

    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }
}
