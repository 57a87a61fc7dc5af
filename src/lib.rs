//! GHN forwarding proxy library.
//!
//! Accepts `POST {url, data, headers}`, checks `url` against a domain
//! allowlist, forwards `data` once and wraps the outcome in a JSON envelope.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
