use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sealbook_core::generator::{CrypticConfig, MemorableConfig};
use sealbook_core::{CipherAlgorithm, Generator, KdfStrength, PasswordStyle};

use crate::constants::{CONFIG_ENV, DEFAULT_VAULT_FILE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealbookConfig {
    pub vault: VaultSection,
    pub security: SecuritySection,
    pub generator: GeneratorSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    /// Algorithm for new vaults.
    pub algorithm: CipherAlgorithm,
    /// Argon2id preset for new vaults and password changes.
    pub kdf_strength: KdfStrength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Style used when a command does not name one.
    pub style: PasswordStyle,
    pub cryptic: CrypticConfig,
    pub memorable: MemorableConfig,
}

impl GeneratorSection {
    pub fn generator(&self) -> Generator {
        Generator {
            cryptic: self.cryptic.clone(),
            memorable: self.memorable.clone(),
        }
    }
}

impl SealbookConfig {
    pub fn new(vault_path: &Path, algorithm: CipherAlgorithm, kdf_strength: KdfStrength) -> Self {
        Self {
            vault: VaultSection {
                path: Some(vault_path.to_string_lossy().to_string()),
            },
            security: SecuritySection {
                algorithm,
                kdf_strength,
            },
            generator: GeneratorSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DEFAULT_VAULT_FILE))
}

/// Read the config file, or defaults when there is none yet.
pub fn load_config(path: &Path) -> anyhow::Result<SealbookConfig> {
    if !path.exists() {
        return Ok(SealbookConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<SealbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &SealbookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("sealbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("sealbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
