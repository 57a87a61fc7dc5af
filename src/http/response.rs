//! Response envelope.
//!
//! Every JSON body the relay produces has the shape
//! `{code, message, data, meta?}`. Upstream results are always wrapped in
//! an outer 200 with the upstream status carried in `code`; failures use
//! their own status both outside and in `code`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;
use crate::upstream::UpstreamResponse;

/// Standard response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    pub timestamp: String,
    pub proxy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Current time as ISO-8601 with millisecond precision, e.g.
/// `2024-05-01T08:30:00.123Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Envelope {
    /// Wrap a completed upstream exchange.
    pub fn from_upstream(upstream: UpstreamResponse, proxy: &str) -> Self {
        let message = if upstream.status == 200 {
            "Success"
        } else {
            "API Error"
        };
        Self {
            code: upstream.status,
            message: message.to_string(),
            data: upstream.body,
            meta: Some(Meta {
                response_time: Some(u64::try_from(upstream.elapsed.as_millis()).unwrap_or(u64::MAX)),
                timestamp: iso_timestamp(),
                proxy: proxy.to_string(),
                error: None,
            }),
        }
    }

    /// Describe a failure. Validation rejections carry no `meta`.
    pub fn from_error(err: &RelayError, proxy: &str) -> Self {
        Self {
            code: err.status().as_u16(),
            message: err.message(),
            data: Value::Null,
            meta: err.kind().map(|kind| Meta {
                response_time: None,
                timestamp: iso_timestamp(),
                proxy: proxy.to_string(),
                error: Some(kind.to_string()),
            }),
        }
    }
}

/// Outer 200 regardless of the upstream status.
pub fn upstream_response(upstream: UpstreamResponse, proxy: &str) -> Response {
    (StatusCode::OK, Json(Envelope::from_upstream(upstream, proxy))).into_response()
}

/// Failure status with its envelope.
pub fn error_response(err: &RelayError, proxy: &str) -> Response {
    (err.status(), Json(Envelope::from_error(err, proxy))).into_response()
}
