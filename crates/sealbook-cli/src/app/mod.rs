//! Application-level utilities for the sealbook CLI.
//!
//! This module provides:
//! - Path and config resolution
//! - Master password handling with retry logic
//! - Cancellable background work for key derivation and re-encryption

mod background;
mod context;
mod password;

pub use background::run_cancellable;
pub use context::AppContext;
