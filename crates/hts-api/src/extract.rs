//! Declared-length payload extractor
//!
//! A POST body is only accepted when it carries a numeric `Content-Length`
//! and the bytes received add up to exactly that length. Anything else is
//! rejected before the device is touched.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};

use crate::error::ApiError;
use crate::state::AppState;

/// Raw request body whose length matched its `Content-Length`
#[derive(Debug)]
pub struct Payload(Bytes);

impl Payload {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Parse the declared body length from the request headers
pub fn declared_length(headers: &HeaderMap) -> Result<usize, ApiError> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or_else(|| ApiError::BadRequest("Missing Content-Length header".to_string()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Invalid Content-Length header: {:?}", value))
        })
}

impl FromRequest<AppState> for Payload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let declared = declared_length(req.headers())?;

        let limit = state.max_payload_bytes();
        if declared > limit {
            return Err(ApiError::PayloadTooLarge(format!(
                "Content-Length {} exceeds limit of {} bytes",
                declared, limit
            )));
        }

        // A body longer than declared trips the limit, a shorter one is
        // caught by the length check below.
        let body = axum::body::to_bytes(req.into_body(), declared)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {}", e)))?;

        if body.len() != declared {
            return Err(ApiError::BadRequest(format!(
                "Request body is {} bytes but Content-Length is {}",
                body.len(),
                declared
            )));
        }

        Ok(Payload(body))
    }
}
