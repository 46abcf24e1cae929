//! Mock device sink for testing

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use super::DeviceSink;
use crate::error::{DeviceError, DeviceResult};

/// In-memory device that records every write cycle
///
/// With a byte delay set, payloads are pushed onto the stream one byte at
/// a time with a sleep in between, so unserialized concurrent writers would
/// visibly interleave.
#[derive(Debug, Default)]
pub struct MockDevice {
    /// One entry per open+write+close cycle
    cycles: Mutex<Vec<Bytes>>,
    /// Everything written, in order, as the device would see it
    stream: Mutex<Vec<u8>>,
    failing: AtomicBool,
    byte_delay: Option<Duration>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that writes byte by byte, sleeping `delay` between bytes
    pub fn with_byte_delay(delay: Duration) -> Self {
        Self {
            byte_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Payloads of all completed write cycles
    pub fn writes(&self) -> Vec<Bytes> {
        self.cycles.lock().clone()
    }

    /// Number of completed write cycles
    pub fn write_count(&self) -> usize {
        self.cycles.lock().len()
    }

    /// Concatenated byte stream received by the device
    pub fn stream(&self) -> Vec<u8> {
        self.stream.lock().clone()
    }
}

#[async_trait]
impl DeviceSink for MockDevice {
    async fn write_payload(&self, payload: Bytes) -> DeviceResult<usize> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeviceError::Injected("mock device set to fail".to_string()));
        }

        match self.byte_delay {
            Some(delay) => {
                for byte in payload.iter() {
                    self.stream.lock().push(*byte);
                    tokio::time::sleep(delay).await;
                }
            }
            None => self.stream.lock().extend_from_slice(&payload),
        }

        let len = payload.len();
        self.cycles.lock().push(payload);
        Ok(len)
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
