//! Shutdown coordination for the proxy.

use tokio_util::sync::CancellationToken;

/// Coordinator for graceful shutdown.
///
/// Wraps a cancellation token. The server waits on it to stop accepting,
/// and every in-flight call holds a child token so its outbound request
/// and body stream are abandoned when shutdown is triggered.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Resolve once shutdown has been triggered.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Token for a single call; cancelled with the coordinator but never
    /// cancels it.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
