//! Password generators.
//!
//! Both algorithms are pure functions of their configuration and an explicit
//! random source, so tests drive them with a seeded `StdRng` and production
//! code passes `OsRng`.

pub mod cryptic;
pub mod memorable;
pub mod words;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

pub use cryptic::{generate_cryptic, CrypticConfig};
pub use memorable::{generate_memorable, MemorableConfig};

/// A generated password and the report shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub password: String,
    /// Exact number of characters in `password`.
    pub char_count: usize,
    /// Entropy of the generator configuration that produced it, in bits.
    pub entropy_bits: f64,
}

impl Generated {
    pub(crate) fn new(password: String, entropy_bits: f64) -> Self {
        let char_count = password.chars().count();
        Self {
            password,
            char_count,
            entropy_bits,
        }
    }
}

/// Which generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStyle {
    #[default]
    Cryptic,
    Memorable,
}

impl fmt::Display for PasswordStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordStyle::Cryptic => f.write_str("cryptic"),
            PasswordStyle::Memorable => f.write_str("memorable"),
        }
    }
}

impl FromStr for PasswordStyle {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cryptic" => Ok(PasswordStyle::Cryptic),
            "memorable" => Ok(PasswordStyle::Memorable),
            other => Err(GeneratorError::InvalidConfig(format!(
                "unknown password style: {} (use cryptic or memorable)",
                other
            ))),
        }
    }
}

/// Both generator configurations, as held by a session or the CLI config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Generator {
    pub cryptic: CrypticConfig,
    pub memorable: MemorableConfig,
}

impl Generator {
    pub fn generate<R: Rng + ?Sized>(
        &self,
        style: PasswordStyle,
        rng: &mut R,
    ) -> Result<Generated, GeneratorError> {
        match style {
            PasswordStyle::Cryptic => generate_cryptic(rng, &self.cryptic),
            PasswordStyle::Memorable => generate_memorable(rng, &self.memorable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generator_dispatches_by_style() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(8);
        let cryptic = generator
            .generate(PasswordStyle::Cryptic, &mut rng)
            .unwrap();
        let memorable = generator
            .generate(PasswordStyle::Memorable, &mut rng)
            .unwrap();
        assert!(!cryptic.password.contains('/'));
        assert_eq!(memorable.password.matches('/').count(), 2);
    }

    #[test]
    fn test_report_counts_characters() {
        let generated = Generated::new("ab/cd/éf".to_string(), 1.0);
        assert_eq!(generated.char_count, 8);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("Memorable".parse::<PasswordStyle>().unwrap(), PasswordStyle::Memorable);
        assert!("fancy".parse::<PasswordStyle>().is_err());
    }
}
