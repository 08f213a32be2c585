//! Error types for sealbook core operations.
//!
//! Each subsystem has its own error enum so callers can match on the failure
//! they care about. [`SealbookError`] wraps all of them for operations that
//! cross subsystem boundaries. Errors are descriptive at the core level; the
//! CLI layer maps these to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for sealbook operations.
pub type Result<T> = std::result::Result<T, SealbookError>;

/// Master-password gate failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong master password, or a key check / ciphertext that does not match it.
    ///
    /// The two causes are deliberately reported the same way.
    #[error("Wrong master password")]
    WrongPassword,

    /// The master password does not meet the minimum requirements.
    #[error("Weak master password: {0}")]
    WeakPassword(String),
}

/// Encryption, decryption, and envelope errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Authentication tag mismatch, wrong key, or corrupted ciphertext.
    #[error("Decryption failed")]
    Decryption,

    /// Encryption could not be performed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Ciphertext or envelope is structurally invalid.
    #[error("Malformed ciphertext: {0}")]
    Malformed(String),

    /// Algorithm id is not one this build knows.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key derivation failed (bad parameters).
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

/// Canonical text import errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Not valid JSON, or JSON with the wrong shape.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Document declares a format this build cannot read.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Document names an algorithm this build does not know.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Record at `index` has an empty id.
    #[error("Record #{index} has an empty id")]
    EmptyId { index: usize },

    /// Two records share an id.
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    /// A record has a field with an empty name.
    #[error("Record {record}: field #{index} has an empty name")]
    EmptyFieldName { record: String, index: usize },

    /// A record has two fields with the same name.
    #[error("Record {record}: duplicate field name {name}")]
    DuplicateFieldName { record: String, name: String },

    /// A field declares a kind this build does not know.
    #[error("Record {record}: field {field} has unknown kind {kind}")]
    UnknownFieldKind {
        record: String,
        field: String,
        kind: String,
    },
}

/// Record store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this id already exists.
    #[error("Record already exists: {0}")]
    DuplicateId(String),

    /// Record ids must be non-empty.
    #[error("Record id cannot be empty")]
    InvalidId,

    /// No record with this id.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The record has no field with this name.
    #[error("Record {record} has no field {field}")]
    FieldNotFound { record: String, field: String },

    /// A field with this name already exists on the record.
    #[error("Record {record} already has a field named {field}")]
    DuplicateFieldName { record: String, field: String },

    /// Field names must be non-empty.
    #[error("Field names cannot be empty")]
    EmptyFieldName,

    /// The save was based on an out-of-date copy of the record.
    #[error("Record {id} changed since it was read (expected version {expected}, found {actual})")]
    VersionConflict {
        id: String,
        expected: u64,
        actual: u64,
    },

    /// A field move target is outside the field list.
    #[error("Field position {index} is out of range (record has {len} fields)")]
    PositionOutOfRange { index: usize, len: usize },

    /// Generator actions only apply to password fields.
    #[error("Field {0} is not a password field")]
    NotPasswordField(String),
}

/// Password generator configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The configuration cannot produce a password.
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// No candidate satisfied the length bounds within the attempt budget.
    #[error("Could not generate a password within {0} attempts")]
    Exhausted(usize),
}

/// Top-level error type for sealbook operations.
#[derive(Debug, Error)]
pub enum SealbookError {
    /// Master-password gate error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Encryption or decryption error
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Import/parse error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Record store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Password generator error
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The vault could not be rendered as a document
    #[error("Failed to serialize vault: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Work was cancelled before it committed
    #[error("Operation cancelled")]
    Cancelled,

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SealbookError {
    /// True when the error is the master-password gate rejecting the password.
    pub fn is_wrong_password(&self) -> bool {
        matches!(self, SealbookError::Auth(AuthError::WrongPassword))
    }
}
