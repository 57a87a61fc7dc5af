//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, method gate)
//!     → request.rs (request ID, origin, body decoding, field checks)
//!     → security::allowlist (target domain check)
//!     → upstream::client (single forwarded POST)
//!     → response.rs (envelope rendering)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RelayRequest, RelayRequestId, X_REQUEST_ID};
pub use response::{Envelope, Meta};
pub use server::{build_router, AppState, HttpServer};
