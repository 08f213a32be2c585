//! Progress indicators for slow work using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

use super::context::UiContext;

const UNICODE_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];
const ASCII_TICKS: &[&str] = &["|", "/", "-", "\\", ""];

/// A spinner for indeterminate progress.
///
/// Draws only on an interactive pretty terminal; elsewhere it is silent so
/// scripted output stays stable.
pub struct Spinner {
    bar: Option<IndicatifBar>,
}

impl Spinner {
    /// Create and start a spinner with the given message.
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        let bar = ctx.allows_animation().then(|| {
            let pb = IndicatifBar::new_spinner();
            let template = if ctx.unicode {
                "{spinner:.cyan} {msg}..."
            } else {
                "{spinner} {msg}..."
            };
            let style = ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(if ctx.unicode { UNICODE_TICKS } else { ASCII_TICKS });
            pb.set_style(style);
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });
        Self { bar }
    }

    /// Stop the spinner without printing anything.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}
