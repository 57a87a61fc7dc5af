//! Outcome classification for forwarded calls.

/// Why a forwarded call produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The call did not complete within the configured timeout.
    #[error("Request timeout after {secs} seconds")]
    Timeout { secs: u64 },

    /// DNS, connect or transport failure reaching the target.
    #[error("Network error: {0}")]
    NetworkUnreachable(String),

    /// Anything else, e.g. an undecodable JSON body or an invalid header.
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Classify a reqwest error.
    pub fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            UpstreamError::Timeout { secs: timeout_secs }
        } else if error.is_builder() {
            UpstreamError::Other(error.to_string())
        } else if error.is_connect() || error.is_request() {
            UpstreamError::NetworkUnreachable(error.to_string())
        } else {
            UpstreamError::Other(error.to_string())
        }
    }
}
