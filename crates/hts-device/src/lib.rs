//! hts-device - Serial device access for the HTTP-to-serial bridge
//!
//! This crate owns everything that touches the device:
//! - [`DeviceSink`] trait with a file-backed implementation and a mock for tests
//! - [`DeviceWriter`], a single task that owns the sink and serializes writes
//! - Device configuration and error types
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use hts_device::{DeviceWriter, FileDevice};
//!
//! let sink = Arc::new(FileDevice::new("/dev/ttyUSB0"));
//! let (writer, _worker) = DeviceWriter::spawn(sink, 32);
//! writer.write(bytes::Bytes::from_static(b"\x01\x02\x03")).await?;
//! ```

pub mod config;
pub mod error;
pub mod sink;
pub mod writer;

pub use config::DeviceConfig;
pub use error::{DeviceError, DeviceResult};
pub use sink::{create_sink, DeviceSink, FileDevice, MockDevice};
pub use writer::DeviceWriter;
