//! Master key derivation using Argon2id.
//!
//! One Argon2id run produces 64 bytes: the first half is the symmetric key
//! that encrypts the vault, the second half is the verifier stored next to
//! the ciphertext. Unlocking re-derives both and compares the verifier in
//! constant time, so the plaintext password is never stored or compared.

use argon2::Argon2;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::encoding::b64;
use crate::error::{AuthError, CryptoError, Result, SealbookError};

/// Length of the symmetric key in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// Length of the verifier in bytes.
pub const VERIFIER_LENGTH: usize = 32;

/// Length of freshly generated salts.
pub const SALT_LENGTH: usize = 16;

/// Upper bound on memory cost accepted from a vault file (1 GiB).
const MAX_MEMORY_KIB: u32 = 1024 * 1024;

/// Upper bound on passes accepted from a vault file.
const MAX_ITERATIONS: u32 = 64;

/// Upper bound on lanes accepted from a vault file.
const MAX_PARALLELISM: u32 = 16;

/// Named Argon2id cost presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KdfStrength {
    /// 19 MiB, 2 passes
    Interactive,
    /// 64 MiB, 3 passes
    #[default]
    Moderate,
    /// 256 MiB, 4 passes
    Sensitive,
}

impl KdfStrength {
    /// (memory KiB, iterations, parallelism)
    fn costs(self) -> (u32, u32, u32) {
        match self {
            KdfStrength::Interactive => (19 * 1024, 2, 1),
            KdfStrength::Moderate => (64 * 1024, 3, 1),
            KdfStrength::Sensitive => (256 * 1024, 4, 1),
        }
    }
}

impl std::str::FromStr for KdfStrength {
    type Err = SealbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(KdfStrength::Interactive),
            "moderate" => Ok(KdfStrength::Moderate),
            "sensitive" => Ok(KdfStrength::Sensitive),
            other => Err(SealbookError::InvalidInput(format!(
                "Unknown KDF strength: {} (use interactive, moderate or sensitive)",
                other
            ))),
        }
    }
}

/// Argon2id parameters, salt included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
}

impl KdfParams {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32, salt: Vec<u8>) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
            salt,
        }
    }

    /// Parameters for `strength` with a fresh random salt.
    pub fn generate(strength: KdfStrength) -> Self {
        let mut salt = vec![0u8; SALT_LENGTH];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        Self::with_salt(strength, salt)
    }

    pub fn with_salt(strength: KdfStrength, salt: Vec<u8>) -> Self {
        let (memory_kib, iterations, parallelism) = strength.costs();
        Self::new(memory_kib, iterations, parallelism, salt)
    }

    /// Reject costs above the caps before any work is done.
    fn check_limits(&self) -> Result<()> {
        let limits = [
            ("Memory cost (KiB)", self.memory_kib, MAX_MEMORY_KIB),
            ("Iterations", self.iterations, MAX_ITERATIONS),
            ("Parallelism", self.parallelism, MAX_PARALLELISM),
        ];
        for (what, value, max) in limits {
            if value > max {
                return Err(CryptoError::KeyDerivation(format!(
                    "{} {} exceeds the limit of {}",
                    what, value, max
                ))
                .into());
            }
        }
        Ok(())
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        self.check_limits()?;
        let params = argon2::Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LENGTH + VERIFIER_LENGTH),
        )
        .map_err(|e| CryptoError::KeyDerivation(format!("Invalid Argon2 params: {}", e)))?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

/// The symmetric key that encrypts a vault.
///
/// Key material is zeroized when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct MasterKey {
    key: [u8; KEY_LENGTH],
}

impl MasterKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes. Use only for immediate cipher operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Verifier half of the derived material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Verifier(#[serde(with = "b64::array32")] [u8; VERIFIER_LENGTH]);

impl Verifier {
    /// Constant-time comparison.
    pub fn ct_matches(&self, other: &Verifier) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }

    pub fn as_bytes(&self) -> &[u8; VERIFIER_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Verifier([REDACTED])")
    }
}

/// Everything needed to check a master password later: the KDF parameters
/// (with salt) and the verifier they produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCheck {
    pub kdf: KdfParams,
    pub verifier: Verifier,
}

/// Output of one derivation.
#[derive(Debug, Clone)]
pub struct DerivedKeys {
    pub key: MasterKey,
    pub verifier: Verifier,
}

impl DerivedKeys {
    /// Bundle the verifier with the parameters that produced it.
    pub fn key_check(&self, params: &KdfParams) -> KeyCheck {
        KeyCheck {
            kdf: params.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

/// Derive the master key and verifier from a password.
///
/// Same password and params always yield the same output.
///
/// # Errors
///
/// `InvalidInput` for an empty password or a salt shorter than 16 bytes;
/// `Crypto(KeyDerivation)` for Argon2 parameter errors.
pub fn derive(master_password: &str, params: &KdfParams) -> Result<DerivedKeys> {
    if master_password.is_empty() {
        return Err(SealbookError::InvalidInput(
            "Master password cannot be empty".to_string(),
        ));
    }
    if params.salt.len() < SALT_LENGTH {
        return Err(SealbookError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            SALT_LENGTH
        )));
    }

    tracing::debug!(
        memory_kib = params.memory_kib,
        iterations = params.iterations,
        "deriving master key"
    );

    let mut output = [0u8; KEY_LENGTH + VERIFIER_LENGTH];
    params
        .argon2()?
        .hash_password_into(master_password.as_bytes(), &params.salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let mut key = [0u8; KEY_LENGTH];
    let mut verifier = [0u8; VERIFIER_LENGTH];
    key.copy_from_slice(&output[..KEY_LENGTH]);
    verifier.copy_from_slice(&output[KEY_LENGTH..]);
    output.zeroize();

    Ok(DerivedKeys {
        key: MasterKey::from_bytes(key),
        verifier: Verifier(verifier),
    })
}

/// Check a master password against a stored key check.
///
/// Returns the master key on success so callers do not derive twice.
///
/// # Errors
///
/// `AuthError::WrongPassword` when the verifier does not match.
pub fn verify(master_password: &str, check: &KeyCheck) -> Result<MasterKey> {
    let derived = derive(master_password, &check.kdf)?;
    if derived.verifier.ct_matches(&check.verifier) {
        Ok(derived.key)
    } else {
        Err(AuthError::WrongPassword.into())
    }
}

#[cfg(test)]
pub(crate) fn test_params() -> KdfParams {
    KdfParams::new(8, 1, 1, b"fixed-test-salt-0123456789".to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_deterministic() {
        let params = test_params();
        let a = derive("correct horse", &params).unwrap();
        let b = derive("correct horse", &params).unwrap();
        assert_eq!(a.key.as_bytes(), b.key.as_bytes());
        assert!(a.verifier.ct_matches(&b.verifier));
    }

    #[test]
    fn test_key_and_verifier_differ() {
        let derived = derive("correct horse", &test_params()).unwrap();
        assert_ne!(derived.key.as_bytes(), derived.verifier.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let a = derive("pw-12345678", &KdfParams::new(8, 1, 1, vec![1u8; 16])).unwrap();
        let b = derive("pw-12345678", &KdfParams::new(8, 1, 1, vec![2u8; 16])).unwrap();
        assert_ne!(a.key.as_bytes(), b.key.as_bytes());
    }

    #[test]
    fn test_verify_accepts_right_password() {
        let params = test_params();
        let check = derive("open sesame", &params).unwrap().key_check(&params);
        let key = verify("open sesame", &check).unwrap();
        assert_eq!(
            key.as_bytes(),
            derive("open sesame", &params).unwrap().key.as_bytes()
        );
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let params = test_params();
        let check = derive("open sesame", &params).unwrap().key_check(&params);
        let err = verify("open sesame!", &check).unwrap_err();
        assert!(err.is_wrong_password());
    }

    #[test]
    fn test_verify_rejects_corrupted_verifier() {
        let params = test_params();
        let mut check = derive("open sesame", &params).unwrap().key_check(&params);
        check.verifier.0[0] ^= 0x01;
        let err = verify("open sesame", &check).unwrap_err();
        assert!(err.is_wrong_password());
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = derive("", &test_params()).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_short_salt_rejected() {
        let err = derive("pw", &KdfParams::new(8, 1, 1, b"short".to_vec())).unwrap_err();
        assert!(err.to_string().contains("at least 16 bytes"));
    }

    #[test]
    fn test_excessive_memory_rejected() {
        let params = KdfParams::new(MAX_MEMORY_KIB + 1, 1, 1, vec![0u8; 16]);
        let err = derive("pw", &params).unwrap_err();
        assert!(matches!(
            err,
            SealbookError::Crypto(CryptoError::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_excessive_passes_and_lanes_rejected() {
        for params in [
            KdfParams::new(8, u32::MAX, 1, vec![0u8; 16]),
            KdfParams::new(8, MAX_ITERATIONS + 1, 1, vec![0u8; 16]),
            KdfParams::new(64, 1, MAX_PARALLELISM + 1, vec![0u8; 16]),
        ] {
            let err = derive("pw", &params).unwrap_err();
            assert!(
                matches!(err, SealbookError::Crypto(CryptoError::KeyDerivation(_))),
                "{:?}",
                params
            );
        }
        for strength in [KdfStrength::Interactive, KdfStrength::Sensitive] {
            let params = KdfParams::with_salt(strength, vec![0u8; 16]);
            assert!(params.check_limits().is_ok());
        }
    }

    #[test]
    fn test_generated_salts_unique() {
        let a = KdfParams::generate(KdfStrength::Interactive);
        let b = KdfParams::generate(KdfStrength::Interactive);
        assert_eq!(a.salt.len(), SALT_LENGTH);
        assert_ne!(a.salt, b.salt);
    }

    #[test]
    fn test_strength_parse() {
        assert_eq!(
            "Sensitive".parse::<KdfStrength>().unwrap(),
            KdfStrength::Sensitive
        );
        assert!("extreme".parse::<KdfStrength>().is_err());
    }

    #[test]
    fn test_master_key_debug_redacts() {
        let derived = derive("test-passphrase", &test_params()).unwrap();
        let debug_output = format!("{:?}", derived.key);
        assert!(debug_output.contains("REDACTED"));
        let key_hex = hex::encode(&derived.key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
