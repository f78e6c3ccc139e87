//! Cooperative cancellation for the pickup wait
//!
//! A token is a shared flag plus a wakeup:
//! - `cancel()` may be called from any task (e.g. a Ctrl+C listener)
//! - the waiter only observes it while suspended between probes
//! - once cancelled, a token stays cancelled

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::debug;

/// Cancellation token
///
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Create a new, not yet cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            debug!("Cancellation requested");
        }
        self.inner.notify.notify_waiters();
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolve once cancellation is requested
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a concurrent cancel() is never missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
