//! HTTP request handlers for the bridge
//!
//! Every path is served by the same three handlers; the path only shows up
//! in the POST acknowledgment.

pub mod forward;
pub mod health;
