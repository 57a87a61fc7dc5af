//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Build the outbound header set (defaults, then caller overrides)
//! - Issue exactly one POST with a JSON body
//! - Decode the response as JSON or text depending on its content type
//! - Measure time to response headers
//!
//! # Design Decisions
//! - Body framing and connection headers are owned by the client; caller
//!   values for them are dropped so they cannot desync the serialized body
//! - `Host` always follows the allowlisted URL

use std::time::{Duration, Instant};

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST,
    TRANSFER_ENCODING, USER_AGENT,
};
use serde_json::{Map, Value};
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::error::UpstreamError;

/// A completed upstream exchange.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
    /// Time from sending until response headers arrived.
    pub elapsed: Duration,
}

/// Headers a caller may not set on the outbound request.
const RESERVED_HEADERS: [HeaderName; 4] = [CONTENT_LENGTH, TRANSFER_ENCODING, CONNECTION, HOST];

/// Shared outbound client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    user_agent: HeaderValue,
    timeout_secs: u64,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| UpstreamError::Other(format!("Invalid user agent: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Other(e.to_string()))?;

        Ok(Self {
            client,
            user_agent,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Merge default headers with caller-supplied ones. Caller entries win,
    /// except for [`RESERVED_HEADERS`], which are skipped.
    pub fn build_headers(&self, caller: &Map<String, Value>) -> Result<HeaderMap, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, self.user_agent.clone());

        for (name, value) in caller {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| UpstreamError::Other(format!("Invalid header name: {name}")))?;
            if RESERVED_HEADERS.contains(&name) {
                tracing::debug!(header = %name, "Dropping reserved caller header");
                continue;
            }
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let value = HeaderValue::from_str(&value).map_err(|_| {
                UpstreamError::Other(format!("Invalid value for header {name}"))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Forward `data` to `url` as a single JSON POST.
    pub async fn forward(
        &self,
        url: Url,
        data: &Value,
        caller_headers: &Map<String, Value>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        if !matches!(url.scheme(), "http" | "https") {
            tracing::warn!(url = %url, "Unsupported target scheme");
            return Err(UpstreamError::NetworkUnreachable(format!(
                "unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let headers = self.build_headers(caller_headers)?;
        let body = serde_json::to_vec(data).map_err(|e| UpstreamError::Other(e.to_string()))?;

        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;
        let elapsed = start.elapsed();

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let body = if is_json {
            let bytes = response.bytes().await.map_err(|e| self.classify(&e))?;
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Other(e.to_string()))?
        } else {
            Value::String(response.text().await.map_err(|e| self.classify(&e))?)
        };

        Ok(UpstreamResponse {
            status,
            body,
            elapsed,
        })
    }

    fn classify(&self, error: &reqwest::Error) -> UpstreamError {
        let classified = UpstreamError::from_reqwest(error, self.timeout_secs);
        tracing::warn!(
            url = error.url().map(|u| u.as_str()).unwrap_or("<unknown>"),
            error = %error,
            classified = ?classified,
            "Outbound call failed"
        );
        classified
    }
}
