//! Errors raised by the CLI itself, and the exit code for any error that
//! reaches `main`.

use std::fmt;

use sealbook_core::error::{AuthError, CryptoError, GeneratorError, StoreError};
use sealbook_core::SealbookError;

use crate::constants::exit_codes;

/// What went wrong, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Vault file, input file or record missing.
    NotFound,
    /// Master password missing or wrong.
    AuthFailed,
    InvalidInput,
}

impl Failure {
    pub fn exit_code(self) -> i32 {
        match self {
            Failure::NotFound => exit_codes::NOT_FOUND,
            Failure::AuthFailed => exit_codes::AUTH_FAILED,
            Failure::InvalidInput => exit_codes::INVALID_INPUT,
        }
    }
}

/// A failure detected by the CLI before or around a core call.
///
/// Displays as the message, then the hint on the next line; `main` splits
/// them again when printing.
#[derive(Debug)]
pub struct CliError {
    pub failure: Failure,
    message: String,
    hint: Option<String>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match &self.hint {
            Some(hint) => write!(f, "\n{}", hint),
            None => Ok(()),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    fn new(failure: Failure, message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            failure,
            message: message.into(),
            hint,
        }
    }

    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(Failure::NotFound, message, Some(hint.into()))
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(Failure::AuthFailed, message, Some(hint.into()))
    }

    /// Bad arguments or input. A hint, if any, goes after a newline in `message`.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(Failure::InvalidInput, message, None)
    }

    pub fn exit_code(&self) -> i32 {
        self.failure.exit_code()
    }
}

/// Exit code for a core error.
pub fn core_exit_code(err: &SealbookError) -> i32 {
    match err {
        SealbookError::Auth(AuthError::WrongPassword) => exit_codes::AUTH_FAILED,
        SealbookError::Auth(AuthError::WeakPassword(_)) => exit_codes::INVALID_INPUT,
        SealbookError::Crypto(CryptoError::Decryption | CryptoError::Malformed(_)) => {
            exit_codes::INTEGRITY_FAILED
        }
        SealbookError::Crypto(CryptoError::UnsupportedAlgorithm(_)) => exit_codes::INVALID_INPUT,
        SealbookError::Crypto(_) => exit_codes::GENERAL,
        SealbookError::Store(StoreError::NotFound(_) | StoreError::FieldNotFound { .. }) => {
            exit_codes::NOT_FOUND
        }
        SealbookError::Store(StoreError::VersionConflict { .. }) => exit_codes::CONFLICT,
        SealbookError::Store(_)
        | SealbookError::Import(_)
        | SealbookError::Generator(_)
        | SealbookError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        SealbookError::Cancelled => exit_codes::CANCELLED,
        SealbookError::Serialize(_) | SealbookError::Io { .. } => exit_codes::GENERAL,
    }
}

/// Exit code for any error that reached `main`.
///
/// Walks the cause chain so context added with `anyhow::Context` does not
/// hide the typed error underneath.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(core) = cause.downcast_ref::<SealbookError>() {
            return core_exit_code(core);
        }
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            return core_exit_code(&SealbookError::Store(store.clone()));
        }
        if cause.is::<GeneratorError>() {
            return exit_codes::INVALID_INPUT;
        }
    }
    exit_codes::GENERAL
}
