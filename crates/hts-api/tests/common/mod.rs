//! Shared helpers for bridge API tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hts_api::{create_router, AppState};
use hts_device::{DeviceSink, DeviceWriter, MockDevice};
use tokio::net::TcpListener;

/// Router wired to a fresh mock device
pub fn mock_router() -> (Router, Arc<MockDevice>) {
    let mock = Arc::new(MockDevice::new());
    (router_for(mock.clone(), None), mock)
}

/// Router for an arbitrary sink, optionally with a payload limit
pub fn router_for(sink: Arc<dyn DeviceSink>, max_payload: Option<usize>) -> Router {
    let (writer, _worker) = DeviceWriter::spawn(sink, 8);
    let state = match max_payload {
        Some(limit) => AppState::with_max_payload(writer, limit),
        None => AppState::new(writer),
    };
    create_router(state)
}

/// A live server on a loopback port that shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    pub async fn start(router: Router) -> Self {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stop accepting connections and wait for the server task
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
