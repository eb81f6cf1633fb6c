//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logging.rs (structured log events, one span per call)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Each call gets a UUID request ID recorded on its span only; it is
//!   never added to forwarded headers
//! - Bodies and header values are never logged

pub mod logging;
pub mod metrics;
