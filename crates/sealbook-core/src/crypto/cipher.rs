//! Authenticated symmetric encryption of vault blobs.
//!
//! Every supported algorithm is an AEAD with a 96-bit nonce, so tampering
//! and wrong-key decryption are detected instead of producing garbage. The
//! algorithm id is bound into the associated data, which means a blob cannot
//! be replayed under a different algorithm label.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload};
use aes_gcm::Aes256Gcm;
use aes_gcm_siv::Aes256GcmSiv;
use chacha20poly1305::ChaCha20Poly1305;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::kdf::MasterKey;
use crate::error::{CryptoError, Result};
use crate::task::CancelToken;

/// Nonce length shared by all supported algorithms.
pub const NONCE_LENGTH: usize = 12;

/// Supported cipher algorithms.
///
/// The id strings are persisted, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CipherAlgorithm {
    #[default]
    #[serde(rename = "crypt-aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "crypt-aes-256-gcm-siv")]
    Aes256GcmSiv,
    #[serde(rename = "crypt-chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl CipherAlgorithm {
    pub const ALL: [CipherAlgorithm; 3] = [
        CipherAlgorithm::Aes256Gcm,
        CipherAlgorithm::Aes256GcmSiv,
        CipherAlgorithm::ChaCha20Poly1305,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CipherAlgorithm::Aes256Gcm => "crypt-aes-256-gcm",
            CipherAlgorithm::Aes256GcmSiv => "crypt-aes-256-gcm-siv",
            CipherAlgorithm::ChaCha20Poly1305 => "crypt-chacha20-poly1305",
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        CipherAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == wanted)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(wanted.to_string()))
    }
}

/// Ciphertext plus what is needed to decrypt it (besides the key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    pub algorithm: CipherAlgorithm,
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

fn seal_with<C: Aead + KeyInit>(
    key: &MasterKey,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> std::result::Result<Vec<u8>, CryptoError> {
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("Invalid key: {}", e)))?;
    cipher
        .encrypt(
            Nonce::<C>::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

fn open_with<C: Aead + KeyInit>(
    key: &MasterKey,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> std::result::Result<Vec<u8>, CryptoError> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::Decryption)?;
    cipher
        .decrypt(
            Nonce::<C>::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| CryptoError::Decryption)
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(
    plaintext: &[u8],
    key: &MasterKey,
    algorithm: CipherAlgorithm,
) -> Result<SealedBlob> {
    let mut nonce = vec![0u8; NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    let aad = algorithm.id().as_bytes();

    let ciphertext = match algorithm {
        CipherAlgorithm::Aes256Gcm => seal_with::<Aes256Gcm>(key, &nonce, aad, plaintext)?,
        CipherAlgorithm::Aes256GcmSiv => seal_with::<Aes256GcmSiv>(key, &nonce, aad, plaintext)?,
        CipherAlgorithm::ChaCha20Poly1305 => {
            seal_with::<ChaCha20Poly1305>(key, &nonce, aad, plaintext)?
        }
    };

    tracing::debug!(%algorithm, bytes = plaintext.len(), "encrypted blob");
    Ok(SealedBlob {
        algorithm,
        nonce,
        ciphertext,
    })
}

/// Decrypt a blob.
///
/// # Errors
///
/// `CryptoError::Decryption` for any authentication failure, whatever the
/// cause (wrong key, tampered ciphertext, truncated tag);
/// `CryptoError::Malformed` when the nonce has the wrong length.
pub fn decrypt(blob: &SealedBlob, key: &MasterKey) -> Result<Vec<u8>> {
    if blob.nonce.len() != NONCE_LENGTH {
        return Err(CryptoError::Malformed(format!(
            "Nonce must be {} bytes, found {}",
            NONCE_LENGTH,
            blob.nonce.len()
        ))
        .into());
    }
    let aad = blob.algorithm.id().as_bytes();
    let plaintext = match blob.algorithm {
        CipherAlgorithm::Aes256Gcm => {
            open_with::<Aes256Gcm>(key, &blob.nonce, aad, &blob.ciphertext)?
        }
        CipherAlgorithm::Aes256GcmSiv => {
            open_with::<Aes256GcmSiv>(key, &blob.nonce, aad, &blob.ciphertext)?
        }
        CipherAlgorithm::ChaCha20Poly1305 => {
            open_with::<ChaCha20Poly1305>(key, &blob.nonce, aad, &blob.ciphertext)?
        }
    };
    Ok(plaintext)
}

/// Move a blob to another algorithm under the same key.
///
/// Decrypts with the blob's algorithm and encrypts with `target`, checking
/// `cancel` between the steps. Nothing is committed here: the caller swaps
/// the returned blob in only if it wants to.
pub fn reencrypt(
    blob: &SealedBlob,
    key: &MasterKey,
    target: CipherAlgorithm,
    cancel: &CancelToken,
) -> Result<SealedBlob> {
    let plaintext = decrypt(blob, key)?;
    cancel.check()?;
    let sealed = encrypt(&plaintext, key, target)?;
    cancel.check()?;
    Ok(sealed)
}
