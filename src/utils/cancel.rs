//! Cancellation utilities
//!
//! Provides first-class cancellation handles for in-flight requests.

use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a fresh, uncancelled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. A request observing this handle stops waiting on
    /// the transport and its future is dropped, which closes the connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// A child handle that is cancelled together with this one.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }
}

/// Create a standalone cancel handle that can be shared across tasks.
pub fn new_cancel_handle() -> CancelHandle {
    CancelHandle::new()
}
