//! Input and parsing helper functions for the CLI.

use std::io::{self, Read};
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use dialoguer::Password;

use sealbook_core::{FieldKind, PasswordStyle};

use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

/// Character shown in place of each concealed secret.
const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Master password from `SEALBOOK_PASSWORD`, if set and non-blank.
pub fn env_password() -> Option<String> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Prompt for the master password, or read it from `SEALBOOK_PASSWORD`.
pub fn prompt_password(interactive: bool) -> anyhow::Result<String> {
    if let Some(value) = env_password() {
        return Ok(value);
    }
    if !interactive {
        return Err(CliError::auth_failed_with_hint(
            "No master password provided and no TTY available",
            format!("Hint: Set {} for non-interactive use.", PASSWORD_ENV),
        )
        .into());
    }
    Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))
}

/// Prompt for a new master password with confirmation, or read it from `var`.
pub fn prompt_new_password(var: &str, interactive: bool) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No new master password provided and no TTY available. Set {}.",
            var
        ))
        .into());
    }
    Password::new()
        .with_prompt("New master password")
        .with_confirmation("Confirm master password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))
}

/// Split `name<sep>value` at the first separator. The name is trimmed; the
/// value is kept verbatim.
pub fn parse_assignment<'a>(
    raw: &'a str,
    sep: char,
    what: &str,
) -> anyhow::Result<(&'a str, &'a str)> {
    let (name, value) = raw.split_once(sep).ok_or_else(|| {
        CliError::invalid_input(format!(
            "Invalid {} '{}': expected NAME{}VALUE",
            what, raw, sep
        ))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(
            CliError::invalid_input(format!("Invalid {} '{}': empty name", what, raw)).into(),
        );
    }
    Ok((name, value))
}

/// Field kind from the command line, in any case.
pub fn parse_kind(raw: &str) -> anyhow::Result<FieldKind> {
    let raw = raw.trim();
    FieldKind::from_str(&raw.to_ascii_lowercase()).map_err(|_| {
        CliError::invalid_input(format!(
            "Unknown field kind '{}' (use text, password, notes or url)",
            raw
        ))
        .into()
    })
}

pub fn parse_style(raw: &str) -> anyhow::Result<PasswordStyle> {
    PasswordStyle::from_str(raw).map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Parse `name` or `name:style`.
pub fn parse_generate_target(
    raw: &str,
    default_style: PasswordStyle,
) -> anyhow::Result<(String, PasswordStyle)> {
    match raw.rsplit_once(':') {
        Some((name, style)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), parse_style(style)?))
        }
        _ => Ok((raw.trim().to_string(), default_style)),
    }
}

/// Parse `from:to` field positions.
pub fn parse_move(raw: &str) -> anyhow::Result<(usize, usize)> {
    let (from, to) = parse_assignment(raw, ':', "move")?;
    let parse = |part: &str| {
        part.trim().parse::<usize>().map_err(|_| {
            anyhow::Error::from(CliError::invalid_input(format!(
                "Invalid move '{}': positions must be numbers",
                raw
            )))
        })
    };
    Ok((parse(from)?, parse(to)?))
}

/// Read a whole document from a file, or from stdin for `-`.
pub fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer);
    }
    std::fs::read_to_string(source).map_err(|e| {
        CliError::not_found(
            format!("Cannot read {}: {}", source, e),
            "Hint: Check the path, or pass - to read from stdin.",
        )
        .into()
    })
}

/// Value as displayed: secrets are masked unless `reveal`.
pub fn display_value(value: &str, kind: FieldKind, reveal: bool) -> String {
    if kind == FieldKind::Password && !reveal {
        MASK.to_string()
    } else {
        value.to_string()
    }
}

/// Timestamp in the local timezone, minute precision.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
