//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler and upstream client produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (outcome counters, upstream latency histogram)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Request ID is recorded on every request span
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
