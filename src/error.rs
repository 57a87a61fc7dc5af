//! Relay error taxonomy.
//!
//! Every failure the handler can produce maps to exactly one HTTP status and
//! one envelope message. The method, missing-field and domain rejections are
//! returned without `meta`; everything else is a pipeline failure and
//! carries `meta.error`.

use axum::http::StatusCode;

use crate::upstream::UpstreamError;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use POST only.";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: url, data, headers";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error - unable to reach target server";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,

    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Domain {hostname} is not allowed. Only GHN domains are permitted.")]
    DomainRejected { hostname: String },

    /// Target URL could not be parsed. Surfaces as an internal error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("Invalid headers: expected an object of header names to values")]
    InvalidHeaders,

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Outer HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingFields | RelayError::DomainRejected { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream(UpstreamError::Timeout { .. }) => StatusCode::REQUEST_TIMEOUT,
            RelayError::Upstream(UpstreamError::NetworkUnreachable(_)) => StatusCode::BAD_GATEWAY,
            RelayError::InvalidUrl(_)
            | RelayError::InvalidBody(_)
            | RelayError::InvalidHeaders
            | RelayError::BodyRead(_)
            | RelayError::Upstream(UpstreamError::Other(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the envelope.
    pub fn message(&self) -> String {
        match self {
            RelayError::Upstream(UpstreamError::NetworkUnreachable(_)) => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            RelayError::Upstream(UpstreamError::Other(message)) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Kind reported in `meta.error`, or `None` for validation rejections.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            RelayError::MethodNotAllowed
            | RelayError::MissingFields
            | RelayError::DomainRejected { .. } => None,
            RelayError::Upstream(UpstreamError::Timeout { .. }) => Some("RequestTimeout"),
            RelayError::Upstream(UpstreamError::NetworkUnreachable(_)) => Some("BadGateway"),
            _ => Some("InternalError"),
        }
    }

    /// Label used for the outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::MissingFields => "missing_fields",
            RelayError::DomainRejected { .. } => "domain_rejected",
            RelayError::Upstream(UpstreamError::Timeout { .. }) => "timeout",
            RelayError::Upstream(UpstreamError::NetworkUnreachable(_)) => "bad_gateway",
            _ => "internal_error",
        }
    }
}
