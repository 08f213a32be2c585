//! Cancellable units of slow work.
//!
//! Key derivation is intentionally slow and re-encryption touches the whole
//! vault. Both accept a [`CancelToken`] and check it before committing, so a
//! caller can abandon them without leaving a half-applied change behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, SealbookError};

/// Shared cancellation flag.
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Work that already committed is not undone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(SealbookError::Cancelled);
        }
        Ok(())
    }
}

/// Run `work` on tokio's blocking pool.
///
/// The closure receives the token so it can check it between steps. If the
/// token fires while the work is in flight, the result is discarded and
/// `Cancelled` is returned; since the closure only builds new state, the
/// caller's state is untouched.
pub async fn run_blocking<T, F>(token: CancelToken, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> Result<T> + Send + 'static,
{
    let worker_token = token.clone();
    let output = tokio::task::spawn_blocking(move || work(&worker_token))
        .await
        .map_err(|e| SealbookError::InvalidInput(format!("Background task failed: {}", e)))?;
    token.check()?;
    output
}
