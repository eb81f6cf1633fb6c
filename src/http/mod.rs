//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound call
//!     → server.rs (routing, OPTIONS short-circuit)
//!     → request.rs (target URL, method/body rules, request header filter)
//!     → forwarder.rs (outbound call, deadline, cancellation)
//!     → response.rs (response header filter, CORS, streamed body)
//!     → Caller
//!
//! Any fault → error.rs (JSON error response)
//! ```

pub mod forwarder;
pub mod request;
pub mod response;
pub mod server;

pub use forwarder::Forwarder;
pub use request::{OutboundRequest, TARGET_PARAM};
pub use server::{HttpServer, ServerError};
