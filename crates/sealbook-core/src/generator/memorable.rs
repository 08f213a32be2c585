//! Memorable passwords: three words joined by `/`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::words::WORDS;
use super::Generated;
use crate::error::GeneratorError;

/// Words per password. Part of the output contract, not configurable.
pub const WORD_COUNT: usize = 3;

/// Word separator. Part of the output contract, not configurable.
pub const SEPARATOR: char = '/';

/// Candidate draws before giving up on the length bounds.
pub const MAX_ATTEMPTS: usize = 1000;

/// Memorable generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorableConfig {
    /// Word list; `None` uses the built-in list.
    pub words: Option<Vec<String>>,
    /// Shortest eligible word.
    pub word_min_len: usize,
    /// Longest eligible word.
    pub word_max_len: usize,
    /// Shortest acceptable password, separators included.
    pub min_len: usize,
    /// Longest acceptable password, separators included.
    pub max_len: usize,
}

impl Default for MemorableConfig {
    fn default() -> Self {
        Self {
            words: None,
            word_min_len: 3,
            word_max_len: 15,
            min_len: 15,
            max_len: 31,
        }
    }
}

impl MemorableConfig {
    /// Words that fit the per-word bounds and do not contain the separator.
    fn eligible(&self) -> Vec<&str> {
        let fits = |word: &&str| {
            let len = word.chars().count();
            len >= self.word_min_len && len <= self.word_max_len && !word.contains(SEPARATOR)
        };
        match &self.words {
            Some(words) => words.iter().map(String::as_str).filter(fits).collect(),
            None => WORDS.iter().copied().filter(fits).collect(),
        }
    }
}

/// Generate a memorable password.
///
/// Draws three distinct words (sampling without replacement), joins them
/// with `/`, and redraws until the total length is within bounds.
///
/// # Errors
///
/// `InvalidConfig` when fewer than three words are eligible or the bounds are
/// inverted; `Exhausted` when no draw fits within [`MAX_ATTEMPTS`].
pub fn generate_memorable<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MemorableConfig,
) -> Result<Generated, GeneratorError> {
    if config.min_len > config.max_len {
        return Err(GeneratorError::InvalidConfig(format!(
            "minimum length {} exceeds maximum length {}",
            config.min_len, config.max_len
        )));
    }
    let eligible = config.eligible();
    if eligible.len() < WORD_COUNT {
        return Err(GeneratorError::InvalidConfig(format!(
            "need at least {} eligible words, found {}",
            WORD_COUNT,
            eligible.len()
        )));
    }

    let separator = SEPARATOR.to_string();
    for _ in 0..MAX_ATTEMPTS {
        let picked: Vec<&str> = rand::seq::index::sample(&mut *rng, eligible.len(), WORD_COUNT)
            .into_iter()
            .map(|i| eligible[i])
            .collect();
        let password = picked.join(&separator);
        let length = password.chars().count();
        if length >= config.min_len && length <= config.max_len {
            let n = eligible.len() as f64;
            let entropy_bits = (n * (n - 1.0) * (n - 2.0)).log2();
            return Ok(Generated::new(password, entropy_bits));
        }
    }

    Err(GeneratorError::Exhausted(MAX_ATTEMPTS))
}
