//! Header policy subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → headers.rs (drop host, connection, content-length)
//!     → Forwarder
//!
//! Upstream response headers
//!     → headers.rs (drop content-encoding, transfer-encoding)
//!     → cors.rs (overwrite the three Access-Control-* headers)
//!     → Caller
//! ```
//!
//! # Design Decisions
//! - Denylists and CORS values are compile-time constants
//! - Filtering is a pure function over `HeaderMap`

pub mod cors;
pub mod headers;

pub use cors::apply_cors_headers;
pub use headers::{filter_headers, REQUEST_DENYLIST, RESPONSE_DENYLIST};
