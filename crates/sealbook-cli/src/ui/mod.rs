//! UI primitives for the sealbook CLI.
//!
//! - **Context**: environment detection (TTY, width, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and colors
//! - **Render**: tables, headers, receipts, hints
//! - **Progress**: spinner for key derivation and re-encryption

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print_error, receipt, table, TableLook};

pub use progress::Spinner;
