//! Single-writer queue in front of the device
//!
//! One tokio task owns the [`DeviceSink`] and drains a bounded channel of
//! write jobs in arrival order. Handlers hold a cloneable [`DeviceWriter`]
//! and wait on a oneshot reply for the outcome of their own job. Only the
//! worker ever touches the device, so payloads from concurrent requests are
//! never interleaved on the wire.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{DeviceError, DeviceResult};
use crate::sink::DeviceSink;

/// A payload waiting for the device, with the channel to report back on
struct WriteJob {
    payload: Bytes,
    reply: oneshot::Sender<DeviceResult<usize>>,
}

/// Handle to the device writer task
#[derive(Clone)]
pub struct DeviceWriter {
    tx: mpsc::Sender<WriteJob>,
    device: Arc<str>,
}

impl DeviceWriter {
    /// Start the writer task for `sink`
    ///
    /// `queue_depth` bounds how many payloads may wait for the device; when
    /// the queue is full, callers of [`write`](Self::write) wait for room.
    /// The task exits once every handle has been dropped.
    pub fn spawn(sink: Arc<dyn DeviceSink>, queue_depth: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let device: Arc<str> = sink.describe().into();

        let handle = tokio::spawn(run_writer(sink, rx));

        (Self { tx, device }, handle)
    }

    /// Queue `payload` for the device and wait until it has been written
    pub async fn write(&self, payload: Bytes) -> DeviceResult<usize> {
        let (reply, outcome) = oneshot::channel();

        self.tx
            .send(WriteJob { payload, reply })
            .await
            .map_err(|_| DeviceError::WriterClosed)?;

        outcome.await.map_err(|_| DeviceError::WriterClosed)?
    }

    /// Description of the device this writer feeds
    pub fn device(&self) -> &str {
        &self.device
    }

    /// True once the writer task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

async fn run_writer(sink: Arc<dyn DeviceSink>, mut rx: mpsc::Receiver<WriteJob>) {
    let device = sink.describe();
    tracing::info!(%device, "Device writer started");

    while let Some(WriteJob { payload, reply }) = rx.recv().await {
        let len = payload.len();
        let result = sink.write_payload(payload).await;

        if let Err(ref e) = result {
            tracing::warn!(%device, bytes = len, error = %e, "Device write failed");
        }

        if reply.send(result).is_err() {
            tracing::debug!(%device, "Requester went away before the write completed");
        }
    }

    tracing::info!(%device, "Device writer stopped");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sink::MockDevice;

    #[tokio::test]
    async fn writes_in_submission_order() {
        let mock = Arc::new(MockDevice::new());
        let (writer, _worker) = DeviceWriter::spawn(mock.clone(), 4);

        for chunk in [&b"one"[..], b"two", b"three"] {
            writer.write(Bytes::copy_from_slice(chunk)).await.unwrap();
        }

        assert_eq!(mock.write_count(), 3);
        assert_eq!(mock.stream(), b"onetwothree");
        assert_eq!(writer.device(), "mock");
    }

    #[tokio::test]
    async fn concurrent_writes_do_not_interleave() {
        let mock = Arc::new(MockDevice::with_byte_delay(Duration::from_millis(1)));
        let (writer, _worker) = DeviceWriter::spawn(mock.clone(), 8);

        let a = Bytes::from(vec![b'a'; 16]);
        let b = Bytes::from(vec![b'b'; 16]);

        let (ra, rb) = tokio::join!(writer.write(a.clone()), writer.write(b.clone()));
        assert_eq!(ra.unwrap(), 16);
        assert_eq!(rb.unwrap(), 16);

        let stream = mock.stream();
        let ab = [a.as_ref(), b.as_ref()].concat();
        let ba = [b.as_ref(), a.as_ref()].concat();
        assert!(stream == ab || stream == ba, "interleaved: {:?}", stream);
    }

    #[tokio::test]
    async fn many_concurrent_writers_stay_whole() {
        let mock = Arc::new(MockDevice::with_byte_delay(Duration::from_micros(100)));
        let (writer, _worker) = DeviceWriter::spawn(mock.clone(), 2);

        let writes = (0u8..8).map(|i| {
            let writer = writer.clone();
            async move { writer.write(Bytes::from(vec![i; 8])).await }
        });
        for result in futures_util::future::join_all(writes).await {
            assert_eq!(result.unwrap(), 8);
        }

        let stream = mock.stream();
        assert_eq!(stream.len(), 64);
        for run in stream.chunks(8) {
            assert!(run.iter().all(|b| *b == run[0]), "interleaved run: {:?}", run);
        }
    }

    #[tokio::test]
    async fn device_error_is_reported_and_writer_keeps_running() {
        let mock = Arc::new(MockDevice::new());
        let (writer, _worker) = DeviceWriter::spawn(mock.clone(), 4);

        mock.set_failing(true);
        let err = writer.write(Bytes::from_static(b"lost")).await.unwrap_err();
        assert!(err.is_io());

        mock.set_failing(false);
        writer.write(Bytes::from_static(b"kept")).await.unwrap();
        assert_eq!(mock.stream(), b"kept");
    }

    #[tokio::test]
    async fn write_after_worker_stopped_is_writer_closed() {
        let mock = Arc::new(MockDevice::new());
        let (writer, worker) = DeviceWriter::spawn(mock.clone(), 4);

        worker.abort();
        let _ = worker.await;

        let err = writer.write(Bytes::from_static(b"x")).await.unwrap_err();
        assert!(matches!(err, DeviceError::WriterClosed));
        assert!(writer.is_closed());
        assert_eq!(mock.write_count(), 0);
    }

    #[tokio::test]
    async fn zero_queue_depth_is_clamped() {
        let mock = Arc::new(MockDevice::new());
        let (writer, _worker) = DeviceWriter::spawn(mock.clone(), 0);

        writer.write(Bytes::from_static(b"z")).await.unwrap();
        assert_eq!(mock.stream(), b"z");
    }

    #[tokio::test]
    async fn worker_exits_when_handles_dropped() {
        let mock = Arc::new(MockDevice::new());
        let (writer, worker) = DeviceWriter::spawn(mock, 4);

        drop(writer);
        tokio::time::timeout(Duration::from_secs(1), worker)
            .await
            .expect("worker did not stop")
            .unwrap();
    }
}
