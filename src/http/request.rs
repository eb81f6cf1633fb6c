//! Inbound request normalization.
//!
//! # Responsibilities
//! - Classify the inbound method (supported, body-less)
//! - Extract and parse the target URL from the `url` query parameter
//! - Build the outbound request: same method, filtered headers, body
//!
//! # Design Decisions
//! - Parsing happens before any network activity; a bad target never
//!   reaches the transport
//! - The inbound body is never buffered, it is handed to the transport
//!   as a stream
//! - `content-length` is recomputed from the body's exact size, never
//!   copied from the inbound headers

use axum::body::{Body, HttpBody};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Uri};
use url::Url;

use crate::error::ProxyError;
use crate::security::headers::outbound_request_headers;

/// Query parameter carrying the target URL.
pub const TARGET_PARAM: &str = "url";

/// Methods relayed to the target. OPTIONS never gets here, it is answered
/// as preflight.
pub const FORWARDED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
];

/// Whether `method` is relayed to the target.
pub fn is_supported(method: &Method) -> bool {
    FORWARDED_METHODS.contains(method)
}

/// Methods whose body is never forwarded.
pub fn is_bodyless(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Locate and parse the target URL.
///
/// An absent or empty parameter is `MissingTarget`; the first occurrence
/// wins when it repeats.
pub fn extract_target(uri: &Uri) -> Result<Url, ProxyError> {
    let raw = uri
        .query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(name, _)| name == TARGET_PARAM)
                .map(|(_, value)| value)
        })
        .filter(|value| !value.is_empty())
        .ok_or(ProxyError::MissingTarget)?;

    Ok(Url::parse(&raw)?)
}

/// The request sent to the target.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub target: Url,
    pub headers: HeaderMap,
    /// `None` for body-less methods.
    pub body: Option<Body>,
}

impl OutboundRequest {
    /// Derive the outbound request from the inbound one.
    pub fn from_inbound(request: Request<Body>, target: Url) -> Self {
        let (parts, body) = request.into_parts();
        let mut headers = outbound_request_headers(&parts.headers);

        let body = if is_bodyless(&parts.method) {
            None
        } else {
            if let Some(len) = body.size_hint().exact() {
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
            }
            Some(body)
        };

        Self {
            method: parts.method,
            target,
            headers,
            body,
        }
    }
}
