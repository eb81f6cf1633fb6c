//! Cross-origin response headers.
//!
//! The three values are fixed for the life of the process and are written
//! onto every response the proxy produces: forwarded, preflight and error.

use axum::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::Method;

/// Methods advertised to browsers in `Access-Control-Allow-Methods`.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

pub const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
pub const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("*");

/// Comma-separated method list, as used by `Allow` and
/// `Access-Control-Allow-Methods`.
pub fn method_list<'a>(methods: impl IntoIterator<Item = &'a Method>) -> HeaderValue {
    let joined = methods
        .into_iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    // Method names are tokens, so this never fails.
    HeaderValue::from_str(&joined).unwrap_or(HeaderValue::from_static(""))
}

/// Set the CORS headers, replacing any value already present.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, method_list(&ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS);
}
