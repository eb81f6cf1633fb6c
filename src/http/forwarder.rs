//! Outbound call to the target.
//!
//! # Responsibilities
//! - Issue the request with the original method, filtered headers and body
//! - Enforce the optional response-head deadline
//! - Abandon the call when its cancellation token fires
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all calls; no per-call locking
//! - No retries and no redirect policy of our own: the transport default
//!   applies
//! - The deadline covers the response head only, so long downloads are
//!   never cut off by it

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::http::request::OutboundRequest;

/// Performs the forwarded network call.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    response_timeout: Option<Duration>,
}

impl Forwarder {
    /// Build the transport from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            response_timeout: config.response_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Send `request` and wait for the response head.
    pub async fn forward(
        &self,
        request: OutboundRequest,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response, ProxyError> {
        let OutboundRequest {
            method,
            target,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, target).headers(headers);
        if let Some(body) = body {
            builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProxyError::Cancelled),
            result = self.with_deadline(builder.send()) => result,
        }
    }

    async fn with_deadline<F>(&self, send: F) -> Result<reqwest::Response, ProxyError>
    where
        F: Future<Output = reqwest::Result<reqwest::Response>>,
    {
        match self.response_timeout {
            Some(limit) => match tokio::time::timeout(limit, send).await {
                Ok(result) => Ok(result?),
                Err(_) => Err(ProxyError::UpstreamTimeout(limit)),
            },
            None => Ok(send.await?),
        }
    }
}
