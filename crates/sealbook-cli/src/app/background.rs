//! Slow core work off the main thread, with Ctrl-C cancellation.

use sealbook_core::task::run_blocking;
use sealbook_core::{CancelToken, SealbookError};

use crate::ui::{Spinner, UiContext};

/// Run `work` on a blocking worker while a spinner shows `message`.
///
/// Ctrl-C fires the token and returns `Cancelled` straight away. The work
/// only ever builds new state, so nothing on disk has changed at that point.
pub fn run_cancellable<T, F>(ui: &UiContext, message: &str, work: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> sealbook_core::Result<T> + Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to start background runtime: {}", e))?;

    let spinner = Spinner::start(ui, message);
    let token = CancelToken::new();
    let outcome = runtime.block_on(async {
        tokio::select! {
            result = run_blocking(token.clone(), work) => result,
            _ = tokio::signal::ctrl_c() => {
                token.cancel();
                tracing::warn!(task = message, "interrupted");
                Err(SealbookError::Cancelled)
            }
        }
    });
    spinner.clear();
    runtime.shutdown_background();
    Ok(outcome?)
}
