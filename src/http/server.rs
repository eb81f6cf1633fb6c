//! HTTP server setup and the per-call pipeline.
//!
//! # Responsibilities
//! - Create the Axum Router with the single proxy endpoint
//! - Wire up middleware (tracing)
//! - Answer preflight directly, run every other call through
//!   Normalizer → header filter → Forwarder → Composer
//! - Convert pipeline faults into error responses at one boundary
//! - Serve until shutdown, cancelling in-flight calls

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{field, Instrument, Span};
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::forwarder::Forwarder;
use crate::http::request::{self, OutboundRequest};
use crate::http::response;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub shutdown: Shutdown,
}

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig, shutdown: Shutdown) -> Result<Self, ServerError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);

        let state = AppState {
            forwarder,
            shutdown: shutdown.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            shutdown,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.endpoint.path, any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// shutdown is triggered.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoint = %self.config.endpoint.path,
            "HTTP server starting"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Entry point for every call on the proxy endpoint.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        metrics::record_preflight();
        return response::preflight();
    }

    let start = Instant::now();
    let method = request.method().clone();
    let span = tracing::info_span!(
        "proxy",
        request_id = %Uuid::new_v4(),
        method = %method,
        target = field::Empty,
    );

    let response = match forward_call(&state, request).instrument(span.clone()).await {
        Ok(response) => response,
        Err(err) => {
            span.in_scope(|| report(&err));
            err.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

/// The forwarding pipeline; every fault is returned, never raised.
async fn forward_call(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    if !request::is_supported(request.method()) {
        return Err(ProxyError::MethodNotAllowed(request.method().clone()));
    }

    let target = request::extract_target(request.uri())?;
    Span::current().record("target", target.host_str().unwrap_or_default());
    tracing::debug!("Forwarding request");

    let outbound = OutboundRequest::from_inbound(request, target);
    let cancel = state.shutdown.child_token();
    let upstream = state.forwarder.forward(outbound, &cancel).await?;

    tracing::debug!(status = %upstream.status(), "Upstream responded");
    Ok(response::compose(upstream, cancel))
}

fn report(err: &ProxyError) {
    if err.is_client_error() {
        tracing::warn!(error = %err, "Rejected proxy request");
        return;
    }
    if let Some(kind) = err.upstream_kind() {
        metrics::record_upstream_error(kind);
    }
    tracing::error!(error = %err, "Proxy request failed");
}
