//! Response composition.
//!
//! # Responsibilities
//! - Relay upstream status, custom status text, headers and body
//! - Strip body-framing headers and inject CORS headers
//! - Answer CORS preflight without touching the network
//!
//! # Design Decisions
//! - The body is relayed as a stream and never inspected
//! - A call cancelled mid-body ends the stream with an error, so the caller
//!   sees an aborted transfer instead of a short but "complete" body

use axum::body::{Body, Bytes};
use axum::response::Response;
use axum::BoxError;
use futures_util::{Stream, StreamExt};
use hyper::ext::ReasonPhrase;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::security::apply_cors_headers;
use crate::security::headers::forwarded_response_headers;

#[derive(Debug, Error)]
#[error("proxy is shutting down, body transfer aborted")]
struct BodyAborted;

/// Empty 200 with CORS headers.
pub fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    apply_cors_headers(response.headers_mut());
    response
}

/// Turn the upstream response into the one returned to the caller.
pub fn compose(upstream: reqwest::Response, cancel: CancellationToken) -> Response {
    let status = upstream.status();
    let mut headers = forwarded_response_headers(upstream.headers());
    apply_cors_headers(&mut headers);
    let reason = upstream.extensions().get::<ReasonPhrase>().cloned();

    let body = Body::from_stream(cancellable(upstream.bytes_stream(), cancel));
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    if let Some(reason) = reason {
        response.extensions_mut().insert(reason);
    }
    response
}

/// Relay `stream` until it ends or `cancel` fires.
fn cancellable<S, E>(
    stream: S,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<Bytes, BoxError>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    futures_util::stream::unfold(Some((Box::pin(stream), cancel)), |state| async move {
        let (mut stream, cancel) = state?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Some((Err(BoxError::from(BodyAborted)), None)),
            item = stream.next() => {
                let item = item?;
                Some((item.map_err(Into::<BoxError>::into), Some((stream, cancel))))
            }
        }
    })
}
