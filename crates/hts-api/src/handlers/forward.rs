//! Payload forwarding handler

use axum::extract::{OriginalUri, State};

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// `POST /*`: write the request body to the device
///
/// The body has already been checked against `Content-Length` by the
/// [`Payload`] extractor. The write goes through the device writer queue,
/// so this returns only after the device write has finished.
pub async fn forward_payload(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Payload,
) -> Result<String, ApiError> {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let written = state.writer().write(payload.into_bytes()).await?;

    tracing::info!(
        path = %target,
        device = %state.writer().device(),
        bytes = written,
        "Forwarded payload"
    );

    Ok(format!("POST request for {}", target))
}
