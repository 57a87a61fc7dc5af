//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Every response:
//!     → headers.rs (CORS allow-origin/methods/headers)
//!
//! POST body with a target URL:
//!     → allowlist.rs (parse URL, hostname substring check)
//!     → Pass to upstream client
//! ```
//!
//! # Design Decisions
//! - The allowlist is the only authorization check
//! - CORS headers are unconditional, not negotiated per origin

pub mod allowlist;
pub mod headers;

pub use allowlist::DomainAllowlist;
