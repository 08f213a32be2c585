//! # Sealbook Core
//!
//! Core library for sealbook - a local, encrypted store for passwords and
//! other small records, kept as one sealed text file.
//!
//! This crate provides the domain logic independent of any user interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AEAD ciphers, and the sealed text armor
//! - **generator**: cryptic and memorable password generators
//! - **store**: records, typed fields, and optimistic versioning
//! - **format**: canonical plaintext import/export
//! - **session**: the master-password gate around a decrypted database
//! - **task**: cancellation for slow work

pub mod crypto;
pub mod database;
pub mod error;
pub mod example;
pub mod format;
pub mod fs;
pub mod generator;
pub mod session;
pub mod store;
pub mod task;

pub use crypto::{CipherAlgorithm, KdfStrength};
pub use database::{Database, Metadata};
pub use error::{Result, SealbookError};
pub use generator::{Generated, Generator, PasswordStyle};
pub use session::{MergeReport, Session};
pub use store::{FieldEntry, FieldKind, Record, RecordDraft, RecordStore};
pub use task::CancelToken;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
