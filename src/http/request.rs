//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the caller sent none
//! - Resolve the originating address for logging
//! - Decode the relay body `{url, data, headers}`
//! - Apply the required-field check with JavaScript truthiness
//!
//! # Design Decisions
//! - An empty or non-object body simply has no fields
//! - Type problems in individual fields are left to the step that uses them,
//!   so a non-string `url` fails as an invalid URL rather than a 400

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{HeaderValue, Request},
};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::RelayError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Assigns UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayRequestId;

impl MakeRequestId for RelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// `x-forwarded-for` if present, otherwise the peer address.
pub fn client_origin<B>(request: &Request<B>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decoded relay body. Absent fields are `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayRequest {
    pub url: Value,
    pub data: Value,
    pub headers: Value,
}

impl RelayRequest {
    pub fn parse(body: &[u8]) -> Result<Self, RelayError> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?
        };
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).cloned().unwrap_or(Value::Null);
        Self {
            url: field("url"),
            data: field("data"),
            headers: field("headers"),
        }
    }

    /// Truthiness of `(url, data, headers)`.
    pub fn presence(&self) -> (bool, bool, bool) {
        (
            is_truthy(&self.url),
            is_truthy(&self.data),
            is_truthy(&self.headers),
        )
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.presence(), (true, true, true))
    }

    pub fn target_url(&self) -> Result<&str, RelayError> {
        self.url
            .as_str()
            .ok_or_else(|| RelayError::InvalidUrl("url must be a string".to_string()))
    }

    pub fn caller_headers(&self) -> Result<&Map<String, Value>, RelayError> {
        self.headers.as_object().ok_or(RelayError::InvalidHeaders)
    }
}
