//! Liveness handler
//!
//! OPTIONS has no handler of its own: the `CorsLayer` installed in
//! [`create_router`](crate::create_router) answers every OPTIONS request,
//! plain or preflight, with an empty 200 and the allow-any-origin headers.

use axum::http::StatusCode;

/// `GET /*`: empty 200 for liveness checks, never touches the device
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
