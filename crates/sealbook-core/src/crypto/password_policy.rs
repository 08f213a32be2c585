//! Master password policy.
//!
//! Enforced when a vault is created or its master password changes. Unlocking
//! never applies it, so an older vault with a shorter password still opens.

use crate::error::{AuthError, Result};

/// Minimum master password length in characters.
pub const MIN_MASTER_PASSWORD_LENGTH: usize = 8;

/// Validate that a new master password meets the minimum requirements.
///
/// # Requirements
///
/// - Not empty or only whitespace
/// - At least 8 characters long
///
/// # Examples
///
/// ```
/// use sealbook_core::crypto::validate_master_password;
///
/// assert!(validate_master_password("my-secure-passphrase-123").is_ok());
/// assert!(validate_master_password("short").is_err());
/// ```
pub fn validate_master_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(AuthError::WeakPassword("master password cannot be empty".to_string()).into());
    }

    let length = password.chars().count();
    if length < MIN_MASTER_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "master password must be at least {} characters (got {})",
            MIN_MASTER_PASSWORD_LENGTH, length
        ))
        .into());
    }

    Ok(())
}
