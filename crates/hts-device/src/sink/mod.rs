//! Device sinks
//!
//! A sink is the thing payload bytes end up in:
//! - [`FileDevice`] opens a filesystem path (serial port) per write
//! - [`MockDevice`] records writes in memory for tests
//!
//! Sinks are not required to serialize concurrent writes themselves;
//! [`DeviceWriter`](crate::DeviceWriter) guarantees a single caller at a time.

pub mod file;
pub mod mock;

pub use file::FileDevice;
pub use mock::MockDevice;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::DeviceResult;

/// Destination for raw payload bytes
#[async_trait]
pub trait DeviceSink: Send + Sync {
    /// Write the whole payload to the device in one open+write+close cycle
    ///
    /// Returns the number of bytes written, which equals `payload.len()`
    /// on success.
    async fn write_payload(&self, payload: Bytes) -> DeviceResult<usize>;

    /// Human-readable description of the device, used in logs
    fn describe(&self) -> String;
}

/// Create the file-backed sink for a device path
pub fn create_sink(path: &Path) -> Arc<dyn DeviceSink> {
    Arc::new(FileDevice::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_sink_writes_to_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = create_sink(file.path());

        assert_eq!(sink.describe(), file.path().display().to_string());
        assert_eq!(
            sink.write_payload(Bytes::from_static(b"\x01\x02")).await.unwrap(),
            2
        );
        assert_eq!(std::fs::read(file.path()).unwrap(), vec![0x01, 0x02]);
    }
}
