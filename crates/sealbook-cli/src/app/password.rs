//! Master password handling and vault unlocking with retry logic.

use sealbook_core::{SealbookError, Session};

use crate::constants::{MAX_PASSWORD_ATTEMPTS, PASSWORD_ENV};
use crate::errors::CliError;
use crate::helpers::{env_password, prompt_password};
use crate::ui::UiContext;

use super::background::run_cancellable;

fn is_wrong_password(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SealbookError>()
        .is_some_and(SealbookError::is_wrong_password)
}

fn unlock_once(ui: &UiContext, sealed: &str, password: String) -> anyhow::Result<Session> {
    let sealed = sealed.to_string();
    run_cancellable(ui, "Unlocking vault", move |token| {
        Session::unlock_with(&sealed, &password, token)
    })
}

/// Unlock sealed text, prompting up to [`MAX_PASSWORD_ATTEMPTS`] times.
///
/// A password from the environment gets exactly one attempt.
pub fn unlock_with_retry(
    ui: &UiContext,
    sealed: &str,
    interactive: bool,
) -> anyhow::Result<Session> {
    if let Some(password) = env_password() {
        return unlock_once(ui, sealed, password).map_err(|err| {
            if is_wrong_password(&err) {
                CliError::auth_failed_with_hint(
                    "Wrong master password",
                    format!("Hint: Check the value of {}.", PASSWORD_ENV),
                )
                .into()
            } else {
                err
            }
        });
    }

    for attempt in 1..=MAX_PASSWORD_ATTEMPTS {
        let password = prompt_password(interactive)?;
        match unlock_once(ui, sealed, password) {
            Ok(session) => return Ok(session),
            Err(err) if is_wrong_password(&err) => {
                tracing::debug!(attempt, "wrong master password");
                if attempt < MAX_PASSWORD_ATTEMPTS {
                    eprintln!(
                        "Wrong master password, try again ({}/{})",
                        attempt, MAX_PASSWORD_ATTEMPTS
                    );
                }
            }
            Err(err) => return Err(err),
        }
    }

    Err(CliError::auth_failed_with_hint(
        "Too many failed attempts",
        "Hint: There is no recovery without the master password. Restore a backup if you have one.",
    )
    .into())
}
