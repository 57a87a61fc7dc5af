//! HTTP server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all handler
//! - Wire up middleware (CORS headers, request ID, tracing)
//! - Bind server to listener and stop on shutdown signal
//! - Gate methods, validate the body, forward, render the envelope

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::http::request::{client_origin, RelayRequest, RelayRequestId, X_REQUEST_ID};
use crate::http::response::{error_response, iso_timestamp, upstream_response};
use crate::observability::metrics;
use crate::security::{headers::with_cors_headers, DomainAllowlist};
use crate::upstream::{UpstreamClient, UpstreamError, UpstreamResponse};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub allowlist: Arc<DomainAllowlist>,
    pub upstream: UpstreamClient,
    pub proxy_name: Arc<str>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            allowlist: Arc::new(DomainAllowlist::new(
                config.policy.allowed_domains.iter().cloned(),
            )),
            upstream: UpstreamClient::new(&config.upstream)?,
            proxy_name: Arc::from(config.policy.proxy_name.as_str()),
            max_body_size: config.security.max_body_size,
        })
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &RelayConfig) -> Result<Router, UpstreamError> {
    let state = AppState::from_config(config)?;
    let request_id = HeaderName::from_static(X_REQUEST_ID);

    let router = Router::new()
        .route("/{*path}", any(relay_handler))
        .route("/", any(relay_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            let request_id = req
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "relay",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, RelayRequestId));

    Ok(with_cors_headers(router))
}

/// HTTP server for the forwarding relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, UpstreamError> {
        let router = build_router(&config)?;
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            allowed_domains = ?self.config.policy.allowed_domains,
            timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<std::net::SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: preflight, method gate, then relay.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    tracing::info!(
        timestamp = %iso_timestamp(),
        method = %method,
        origin = %client_origin(&request),
        "Incoming request"
    );

    if method == Method::OPTIONS {
        tracing::info!("CORS preflight request handled");
        metrics::record_outcome("preflight");
        return StatusCode::OK.into_response();
    }

    if method != Method::POST {
        tracing::warn!(method = %method, "Method not allowed");
        return reject(&state, RelayError::MethodNotAllowed);
    }

    match relay(&state, request).await {
        Ok(upstream) => {
            let response_time_ms = upstream.elapsed.as_millis();
            tracing::info!(
                status = upstream.status,
                response_time_ms = response_time_ms as u64,
                "Response received"
            );
            metrics::record_upstream(upstream.status, upstream.elapsed);
            metrics::record_outcome("forwarded");
            upstream_response(upstream, &state.proxy_name)
        }
        Err(err) => reject(&state, err),
    }
}

/// Validate the body and forward it once.
async fn relay(state: &AppState, request: Request<Body>) -> Result<UpstreamResponse, RelayError> {
    let bytes = axum::body::to_bytes(request.into_body(), state.max_body_size)
        .await
        .map_err(|e| RelayError::BodyRead(e.to_string()))?;
    let body = RelayRequest::parse(&bytes)?;

    if !body.is_complete() {
        let (url, data, headers) = body.presence();
        tracing::warn!(url, data, headers, "Missing required fields");
        return Err(RelayError::MissingFields);
    }

    let url = match state.allowlist.check(body.target_url()?) {
        Ok(url) => url,
        Err(RelayError::DomainRejected { hostname }) => {
            tracing::warn!(hostname = %hostname, "Domain not allowed");
            return Err(RelayError::DomainRejected { hostname });
        }
        Err(other) => return Err(other),
    };
    let caller_headers = body.caller_headers()?;

    tracing::info!(target_url = %url, "Proxying request");
    let upstream = state
        .upstream
        .forward(url, &body.data, caller_headers)
        .await?;
    Ok(upstream)
}

fn reject(state: &AppState, err: RelayError) -> Response {
    if let Some(kind) = err.kind() {
        tracing::error!(kind, error = %err, "Proxy error");
    }
    metrics::record_outcome(err.outcome());
    error_response(&err, &state.proxy_name)
}
