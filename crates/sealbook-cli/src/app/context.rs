//! Application context for the sealbook CLI.
//!
//! Bundles CLI arguments with the loaded config file, and owns the
//! open/save cycle of the sealed vault file.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use sealbook_core::fs::write_atomic;
use sealbook_core::{Generator, PasswordStyle, Session};

use crate::cli::Cli;
use crate::config::{default_config_path, default_vault_path, load_config, SealbookConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::password::unlock_with_retry;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: PathBuf,
    config: SealbookConfig,
}

impl<'a> AppContext<'a> {
    /// Create a context, reading the config file if there is one.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = default_config_path()?;
        let config = load_config(&config_path)?;
        tracing::debug!(config = %config_path.display(), "loaded config");
        Ok(Self {
            cli,
            config_path,
            config,
        })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn config(&self) -> &SealbookConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Prompts are allowed: stdin is a terminal and `--no-input` is off.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal() && !self.cli.no_input
    }

    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii)
    }

    pub fn generator(&self) -> Generator {
        self.config.generator.generator()
    }

    pub fn default_style(&self) -> PasswordStyle {
        self.config.generator.style
    }

    /// Vault path: `--vault` / `SEALBOOK_VAULT`, then the config file, then
    /// the XDG data directory.
    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.vault.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = self.config.vault.path.as_deref() {
            return Ok(PathBuf::from(path));
        }
        default_vault_path()
    }

    /// Read the vault file and unlock it.
    pub fn open_session(&self, ui: &UiContext) -> anyhow::Result<(Session, PathBuf)> {
        let path = self.vault_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                format!("Vault not found at {}", path.display()),
                "Hint: Run `sealbook init` to create one, or pass --vault <path>.",
            )
            .into());
        }
        let sealed = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read vault {}: {}", path.display(), e))?;
        let session = unlock_with_retry(ui, &sealed, self.interactive())?;
        tracing::info!(
            vault = %path.display(),
            records = session.records().len(),
            "vault unlocked"
        );
        Ok((session, path))
    }

    /// Seal the session and replace the vault file atomically.
    pub fn save_session(&self, session: &Session, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create vault directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }
        let sealed = session.seal()?;
        write_atomic(path, sealed.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write vault {}: {}", path.display(), e))?;
        tracing::info!(vault = %path.display(), "vault saved");
        Ok(())
    }
}
