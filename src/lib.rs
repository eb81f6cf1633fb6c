//! CORS forwarding proxy library.
//!
//! Relays a request to the absolute URL named in its `url` query parameter
//! and returns the target's response with cross-origin headers attached.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
