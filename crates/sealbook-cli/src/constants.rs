//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (vault file, record, field).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments, or import document.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong master password, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Sealed text is corrupted or was tampered with.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// A record changed since it was read.
    pub const CONFLICT: i32 = 7;

    /// Interrupted before the change was committed.
    pub const CANCELLED: i32 = 130;
}

/// Master password for non-interactive use.
pub const PASSWORD_ENV: &str = "SEALBOOK_PASSWORD";

/// Default name of the variable `passwd` reads the new password from.
pub const NEW_PASSWORD_ENV: &str = "SEALBOOK_NEW_PASSWORD";

/// Vault path override.
pub const VAULT_ENV: &str = "SEALBOOK_VAULT";

/// Config file override.
pub const CONFIG_ENV: &str = "SEALBOOK_CONFIG";

/// Log filter, in `tracing_subscriber::EnvFilter` syntax.
pub const LOG_ENV: &str = "SEALBOOK_LOG";

/// Password prompts allowed before giving up.
pub const MAX_PASSWORD_ATTEMPTS: usize = 3;

/// File name of the vault under the data directory.
pub const DEFAULT_VAULT_FILE: &str = "vault.sealbook";
