//! hts-api - HTTP layer of the HTTP-to-serial bridge
//!
//! Accepts POST bodies on any path and hands them to the device writer.
//! GET answers with an empty 200 for liveness checks. OPTIONS requests are
//! answered by the CORS layer, and every response allows any origin.
//!
//! # Usage
//!
//! ```ignore
//! use hts_api::{create_router, AppState};
//! use hts_device::{DeviceWriter, FileDevice};
//!
//! let (writer, _worker) = DeviceWriter::spawn(Arc::new(FileDevice::new("/dev/ttyUSB0")), 32);
//! let router = create_router(AppState::new(writer));
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use extract::Payload;
pub use state::{AppState, DEFAULT_MAX_PAYLOAD_BYTES};

use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the bridge router with the given application state
///
/// The CORS layer sits outermost so it also answers OPTIONS on every path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", bridge_routes())
        .route("/{*path}", bridge_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn bridge_routes() -> MethodRouter<AppState> {
    get(handlers::health::liveness).post(handlers::forward::forward_payload)
}
