//! Cryptic passwords: random characters from a fixed alphabet.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Generated;
use crate::error::GeneratorError;

/// Letters, digits and a few symbols that survive copy/paste and shells.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-!.";

pub const DEFAULT_MIN_LEN: usize = 15;
pub const DEFAULT_MAX_LEN: usize = 31;

/// Cryptic generator settings. Length is drawn uniformly from
/// `min_len..=max_len`; use equal bounds for a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrypticConfig {
    pub alphabet: String,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for CrypticConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl CrypticConfig {
    /// Fixed-length configuration over the default alphabet.
    pub fn with_length(length: usize) -> Self {
        Self {
            min_len: length,
            max_len: length,
            ..Self::default()
        }
    }

    /// Distinct alphabet characters, in first-seen order.
    fn symbols(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for c in self.alphabet.chars() {
            if !symbols.contains(&c) {
                symbols.push(c);
            }
        }
        symbols
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.alphabet.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "alphabet cannot be empty".to_string(),
            ));
        }
        if self.min_len == 0 {
            return Err(GeneratorError::InvalidConfig(
                "length must be at least 1".to_string(),
            ));
        }
        if self.min_len > self.max_len {
            return Err(GeneratorError::InvalidConfig(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_len, self.max_len
            )));
        }
        Ok(())
    }
}

/// Generate a cryptic password.
///
/// # Errors
///
/// `GeneratorError::InvalidConfig` for an empty alphabet, a zero length, or
/// inverted bounds. An empty string is never returned.
pub fn generate_cryptic<R: Rng + ?Sized>(
    rng: &mut R,
    config: &CrypticConfig,
) -> Result<Generated, GeneratorError> {
    config.validate()?;
    let symbols = config.symbols();
    let length = rng.gen_range(config.min_len..=config.max_len);

    let password: String = (0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect();

    let entropy_bits = length as f64 * (symbols.len() as f64).log2();
    Ok(Generated::new(password, entropy_bits))
}
