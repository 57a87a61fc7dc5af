//! Outbound forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! validated target URL + payload + caller headers
//!     → client.rs (merge headers, single POST, total timeout)
//!     → UpstreamResponse { status, body, elapsed }
//!       or UpstreamError { Timeout | NetworkUnreachable | Other }
//! ```
//!
//! # Design Decisions
//! - One attempt per call, never retried
//! - Failures are classified where the call is made, not by the handler
//! - Timeout covers the whole exchange, including reading the body

pub mod client;
pub mod error;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::UpstreamError;
