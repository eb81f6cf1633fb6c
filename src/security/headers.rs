//! Directional header filtering.
//!
//! # Responsibilities
//! - Drop connection-specific request headers before replaying to the target
//! - Drop body-framing response headers before relaying to the caller
//!
//! # Design Decisions
//! - `HeaderName` is always lowercase, so denylist matching is
//!   case-insensitive without extra normalization
//! - Every value of a repeated header survives, in its original order

use axum::http::header::{self, HeaderMap, HeaderName};

/// Request headers tied to the caller's connection to this proxy.
pub const REQUEST_DENYLIST: [HeaderName; 3] =
    [header::HOST, header::CONNECTION, header::CONTENT_LENGTH];

/// Response headers describing the upstream's body framing.
pub const RESPONSE_DENYLIST: [HeaderName; 2] =
    [header::CONTENT_ENCODING, header::TRANSFER_ENCODING];

/// Copy `headers`, omitting every entry whose name is in `denylist`.
pub fn filter_headers(headers: &HeaderMap, denylist: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !denylist.contains(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

/// Headers to send to the target.
pub fn outbound_request_headers(inbound: &HeaderMap) -> HeaderMap {
    filter_headers(inbound, &REQUEST_DENYLIST)
}

/// Upstream headers that may be relayed to the caller.
pub fn forwarded_response_headers(upstream: &HeaderMap) -> HeaderMap {
    filter_headers(upstream, &RESPONSE_DENYLIST)
}
