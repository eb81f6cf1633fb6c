//! Per-call failures and their HTTP rendering.
//!
//! Every fault in the forwarding pipeline ends up here. The `IntoResponse`
//! impl is the only place that decides status codes and error bodies, so
//! the hosting runtime never sees an unhandled fault.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::header;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::http::request::FORWARDED_METHODS;
use crate::security::apply_cors_headers;
use crate::security::cors::method_list;

/// Errors that can occur while handling a single proxied call.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound method is outside the supported set.
    #[error("method {0} is not supported")]
    MethodNotAllowed(Method),

    /// No `url` query parameter, or an empty one.
    #[error("Missing url parameter")]
    MissingTarget,

    /// The `url` query parameter is not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidTarget(#[from] url::ParseError),

    /// The outbound transport failed (DNS, connect, TLS, protocol).
    #[error("{}", error_chain(.0))]
    Upstream(#[from] reqwest::Error),

    /// The upstream did not produce a response head in time.
    #[error("upstream did not respond within {}s", .0.as_secs())]
    UpstreamTimeout(Duration),

    /// The call was abandoned because the proxy is shutting down.
    #[error("request cancelled before the upstream responded")]
    Cancelled,
}

impl ProxyError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingTarget | ProxyError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_)
            | ProxyError::UpstreamTimeout(_)
            | ProxyError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for faults caused by the caller rather than the forward.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Label used for the upstream error metric, if this is a forwarding fault.
    pub fn upstream_kind(&self) -> Option<&'static str> {
        match self {
            ProxyError::Upstream(_) => Some("unreachable"),
            ProxyError::UpstreamTimeout(_) => Some("timeout"),
            ProxyError::Cancelled => Some("cancelled"),
            _ => None,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ProxyError::MethodNotAllowed(_) => ErrorBody::new("Method not allowed"),
            ProxyError::MissingTarget => ErrorBody::new("Missing url parameter"),
            ProxyError::InvalidTarget(_) => ErrorBody::new("Invalid URL"),
            _ => {
                let details = self.to_string();
                ErrorBody {
                    error: "Proxy request failed",
                    details: Some(if details.is_empty() {
                        "Unknown error".to_string()
                    } else {
                        details
                    }),
                }
            }
        }
    }
}

/// JSON error payload: `{"error": ..., "details"?: ...}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: &'static str) -> Self {
        Self {
            error,
            details: None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.body())).into_response();
        let headers = response.headers_mut();
        if matches!(self, ProxyError::MethodNotAllowed(_)) {
            headers.insert(
                header::ALLOW,
                method_list(FORWARDED_METHODS.iter().chain([&Method::OPTIONS])),
            );
        }
        apply_cors_headers(headers);
        response
    }
}

/// Render an error and all of its sources, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
