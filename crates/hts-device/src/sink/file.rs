//! File-backed device sink
//!
//! Opens the device path immediately before each write and closes it when
//! the write returns, on success and on error alike. A missing path is an
//! error; the sink never creates a regular file in place of the device.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::DeviceSink;
use crate::error::{DeviceError, DeviceResult};

/// Serial device addressed by filesystem path
#[derive(Debug, Clone)]
pub struct FileDevice {
    path: PathBuf,
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> DeviceResult<File> {
        let mut options = OpenOptions::new();
        options.append(true);

        // Do not let a tty become the controlling terminal of the daemon
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NOCTTY);
        }

        options.open(path).map_err(|source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Blocking open+write+close cycle. The file handle is dropped (closed)
    /// on every return path.
    fn write_blocking(path: &Path, payload: &[u8]) -> DeviceResult<usize> {
        let mut file = Self::open(path)?;

        let write_err = |source: std::io::Error| DeviceError::Write {
            path: path.to_path_buf(),
            source,
        };
        file.write_all(payload).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        Ok(payload.len())
    }
}

#[async_trait]
impl DeviceSink for FileDevice {
    async fn write_payload(&self, payload: Bytes) -> DeviceResult<usize> {
        let path = self.path.clone();

        let written = tokio::task::spawn_blocking(move || Self::write_blocking(&path, &payload))
            .await
            .map_err(|e| DeviceError::Join(format!("Task join error: {}", e)))??;

        tracing::debug!(device = %self.path.display(), bytes = written, "Wrote payload to device");
        Ok(written)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
