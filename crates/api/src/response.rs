//! Shared response types for API handlers.
//!
//! Resource endpoints return the entity JSON directly (bodies mirror the
//! Issue/User shapes). Endpoints with nothing to return use
//! [`MessageResponse`] instead of an ad-hoc `serde_json::json!` literal.

use serde::Serialize;

/// Standard `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
