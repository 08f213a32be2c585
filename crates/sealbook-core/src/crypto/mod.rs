//! Cryptographic operations for sealbook.
//!
//! - **kdf**: Argon2id master key + verifier derivation
//! - **cipher**: AEAD encryption (AES-256-GCM, AES-256-GCM-SIV, ChaCha20-Poly1305)
//! - **armor**: the ASCII-armored sealed text format
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of a sealed vault file or clipboard copy
//! - Offline brute-force attacks on the master password
//! - Tampering with sealed text (detected, never silently decrypted)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod armor;
pub mod cipher;
mod encoding;
pub mod kdf;
pub mod password_policy;

pub use armor::{armor, dearmor, looks_sealed, Envelope};
pub use cipher::{decrypt, encrypt, reencrypt, CipherAlgorithm, SealedBlob};
pub use kdf::{derive, verify, DerivedKeys, KdfParams, KdfStrength, KeyCheck, MasterKey, Verifier};
pub use password_policy::validate_master_password;
